use super::{error::ApiError, error::ErrorBody, request_path};
use crate::gateway::{AuthGateway, SessionClaims};
use axum::{
    Json,
    extract::{FromRequestParts, OriginalUri},
    http::{header::AUTHORIZATION, request::Parts},
};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Claims of a verified session token taken from `Authorization: Bearer`.
///
/// Rejects with 401 when the header is missing, is not a bearer credential, or
/// the token fails verification (bad signature, expired, malformed).
#[derive(Debug, Clone)]
pub struct AuthenticatedSession(pub SessionClaims);

impl<S> FromRequestParts<S> for AuthenticatedSession
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let path = parts
            .extensions
            .get::<OriginalUri>()
            .map_or_else(|| parts.uri.path().to_string(), request_path);

        let Some(gateway) = parts.extensions.get::<Arc<AuthGateway>>() else {
            return Err(ApiError::unauthorized(path));
        };

        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(bearer_token)
            .ok_or_else(|| ApiError::unauthorized(&path))?;

        gateway
            .sessions()
            .verify(token)
            .map(AuthenticatedSession)
            .map_err(|err| {
                debug!("Session verification failed: {err}");
                ApiError::unauthorized(&path)
            })
    }
}

fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

#[utoipa::path(
    get,
    path = "/user/profile",
    responses (
        (status = 200, description = "Claims of the current session", body = SessionClaims),
        (status = 401, description = "Missing, invalid or expired session token", body = ErrorBody),
    ),
    security(("bearerAuth" = [])),
    tag = "user"
)]
#[instrument(skip_all)]
pub async fn profile(session: AuthenticatedSession) -> Json<SessionClaims> {
    Json(session.0)
}

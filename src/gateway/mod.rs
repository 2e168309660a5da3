//! Authentication gateway.
//!
//! One operation per credential request: build the provider parameters, make
//! exactly one provider call, then either pass the provider result through or
//! (for sign-in) mint a session token. Provider failures are normalized and
//! returned as [`GatewayError`]; nothing is retried.

pub mod normalize;
mod params;
pub mod requests;
pub mod session;

pub use normalize::{NormalizedError, normalize};
pub use requests::{
    ChangePasswordRequest, ConfirmForgotPasswordRequest, ConfirmSignUpRequest,
    ForgotPasswordRequest, ResendConfirmationCodeRequest, SignInRequest, SignUpRequest, Validate,
    ValidationError,
};
pub use session::{SessionClaims, SessionError, SessionIssuer};

use crate::provider::{IdentityProvider, ProviderError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, instrument};
use utoipa::ToSchema;

pub const CONFIRMATION_MESSAGE: &str = "Code validated successfully.";

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("{}", .0.message)]
    Provider(NormalizedError),
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl GatewayError {
    /// HTTP status to report for this failure.
    #[must_use]
    pub fn status(&self) -> u16 {
        match self {
            Self::Provider(normalized) => normalized.http_status,
            Self::Session(_) => normalize::FALLBACK_STATUS,
        }
    }

    /// Provider error code, when the provider supplied one.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Provider(normalized) => normalized.code.as_deref(),
            Self::Session(_) => None,
        }
    }
}

/// Body returned by a successful sign-up confirmation.
#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationMessage {
    pub message: String,
}

pub struct AuthGateway {
    provider: Arc<dyn IdentityProvider>,
    client_id: String,
    sessions: SessionIssuer,
}

impl AuthGateway {
    #[must_use]
    pub fn new(
        provider: Arc<dyn IdentityProvider>,
        client_id: impl Into<String>,
        sessions: SessionIssuer,
    ) -> Self {
        Self {
            provider,
            client_id: client_id.into(),
            sessions,
        }
    }

    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    #[must_use]
    pub fn sessions(&self) -> &SessionIssuer {
        &self.sessions
    }

    /// Authenticate with email and password and return a signed session token.
    ///
    /// # Errors
    /// Returns an error if the provider rejects the credentials, returns no
    /// access token, or the session token cannot be signed.
    #[instrument(skip_all)]
    pub async fn sign_in(&self, request: &SignInRequest) -> Result<String, GatewayError> {
        info!("Sign in request received");
        let token = self
            .provider
            .initiate_auth(params::initiate_auth(&self.client_id, request))
            .await
            .and_then(|result| access_token(&result).map(str::to_string))
            .map_err(|err| provider_failure("Sign in", &err))?;

        self.sessions.issue(&request.email, &token).map_err(|err| {
            error!("Sign in failed: {err}");
            GatewayError::from(err)
        })
    }

    /// Register a new user.
    ///
    /// # Errors
    /// Returns the normalized provider error.
    #[instrument(skip_all)]
    pub async fn sign_up(&self, request: &SignUpRequest) -> Result<Value, GatewayError> {
        info!("Sign up request received");
        self.provider
            .sign_up(params::sign_up(&self.client_id, request))
            .await
            .map_err(|err| provider_failure("Sign up", &err))
    }

    /// Confirm a registration with the code the provider sent.
    ///
    /// # Errors
    /// Returns the normalized provider error.
    #[instrument(skip_all)]
    pub async fn confirm_sign_up(
        &self,
        request: &ConfirmSignUpRequest,
    ) -> Result<ConfirmationMessage, GatewayError> {
        info!("Confirm sign up request received");
        self.provider
            .confirm_sign_up(params::confirm_sign_up(&self.client_id, request))
            .await
            .map_err(|err| provider_failure("Sign up confirmation", &err))?;

        Ok(ConfirmationMessage {
            message: CONFIRMATION_MESSAGE.to_string(),
        })
    }

    /// Start the forgot-password flow.
    ///
    /// # Errors
    /// Returns the normalized provider error.
    #[instrument(skip_all)]
    pub async fn forgot_password(
        &self,
        request: &ForgotPasswordRequest,
    ) -> Result<Value, GatewayError> {
        info!("Forgot password request received");
        self.provider
            .forgot_password(params::forgot_password(&self.client_id, request))
            .await
            .map_err(|err| provider_failure("Forgot password", &err))
    }

    /// Finish the forgot-password flow with the code and a new password.
    ///
    /// # Errors
    /// Returns the normalized provider error.
    #[instrument(skip_all)]
    pub async fn confirm_forgot_password(
        &self,
        request: &ConfirmForgotPasswordRequest,
    ) -> Result<Value, GatewayError> {
        info!("Confirm forgot password request received");
        self.provider
            .confirm_forgot_password(params::confirm_forgot_password(&self.client_id, request))
            .await
            .map_err(|err| provider_failure("Confirm forgot password", &err))
    }

    /// Change the password of the user owning the access token.
    ///
    /// # Errors
    /// Returns the normalized provider error.
    #[instrument(skip_all)]
    pub async fn change_password(
        &self,
        request: &ChangePasswordRequest,
    ) -> Result<Value, GatewayError> {
        info!("Change password request received");
        self.provider
            .change_password(params::change_password(request))
            .await
            .map_err(|err| provider_failure("Change password", &err))
    }

    /// Ask the provider to send a new confirmation code.
    ///
    /// # Errors
    /// Returns the normalized provider error.
    #[instrument(skip_all)]
    pub async fn resend_confirmation_code(
        &self,
        request: &ResendConfirmationCodeRequest,
    ) -> Result<Value, GatewayError> {
        info!("Resend confirmation code request received");
        self.provider
            .resend_confirmation_code(params::resend_confirmation_code(&self.client_id, request))
            .await
            .map_err(|err| provider_failure("Resend confirmation code", &err))
    }
}

impl std::fmt::Debug for AuthGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthGateway")
            .field("client_id", &self.client_id)
            .field("sessions", &self.sessions)
            .finish_non_exhaustive()
    }
}

fn provider_failure(operation: &str, err: &ProviderError) -> GatewayError {
    let normalized = normalize(err);
    error!(
        status = normalized.http_status,
        code = normalized.code.as_deref().unwrap_or("none"),
        "{operation} failed: {}",
        normalized.message
    );
    GatewayError::Provider(normalized)
}

/// Pull the access token out of an `InitiateAuth` result.
///
/// A result without one (e.g. a pending challenge) is reported like any other
/// provider failure, carrying the challenge name as its code.
fn access_token(result: &Value) -> Result<&str, ProviderError> {
    if let Some(token) = result
        .pointer("/AuthenticationResult/AccessToken")
        .and_then(Value::as_str)
        .filter(|token| !token.is_empty())
    {
        return Ok(token);
    }

    let challenge = result.get("ChallengeName").and_then(Value::as_str);
    let message = challenge.map_or_else(
        || "Authentication result did not include an access token".to_string(),
        |name| format!("Authentication challenge required: {name}"),
    );

    Err(ProviderError {
        message: Some(message),
        code: challenge.map(str::to_string),
        ..ProviderError::default()
    })
}

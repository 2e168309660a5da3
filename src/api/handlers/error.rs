use crate::gateway::{GatewayError, ValidationError};
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Uniform failure body returned by every route.
#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    #[schema(example = 400)]
    pub status_code: u16,
    /// RFC 3339 UTC timestamp with milliseconds
    #[schema(example = "2024-01-01T00:00:00.000Z")]
    pub timestamp: String,
    /// Request path, including the query string
    #[schema(example = "/auth/confirm")]
    pub path: String,
    #[schema(example = "Invalid code")]
    pub message: String,
    /// Identity provider error code
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "CodeMismatchException")]
    pub code: Option<String>,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    path: String,
    message: String,
    code: Option<String>,
}

impl ApiError {
    pub fn new(status: StatusCode, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            path: path.into(),
            message: message.into(),
            code: None,
        }
    }

    pub fn unauthorized(path: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, path, "Unauthorized")
    }

    pub fn validation(path: impl Into<String>, err: &ValidationError) -> Self {
        Self::new(StatusCode::BAD_REQUEST, path, err.to_string())
    }

    /// Body that is JSON but has the wrong shape is a client error like any
    /// other validation failure.
    pub fn rejection(path: impl Into<String>, rejection: &JsonRejection) -> Self {
        let status = match rejection {
            JsonRejection::JsonDataError(_) => StatusCode::BAD_REQUEST,
            _ => rejection.status(),
        };
        Self::new(status, path, rejection.body_text())
    }

    pub fn gateway(path: impl Into<String>, err: &GatewayError) -> Self {
        let status =
            StatusCode::from_u16(err.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        Self {
            status,
            path: path.into(),
            message: err.to_string(),
            code: err.code().map(str::to_string),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            status_code: self.status.as_u16(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            path: self.path,
            message: self.message,
            code: self.code,
        };

        (self.status, Json(body)).into_response()
    }
}

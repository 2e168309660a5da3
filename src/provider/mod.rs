//! Identity provider seam.
//!
//! The gateway only needs seven operations from an identity backend. Each one
//! takes the provider call parameters as JSON and returns the provider's raw
//! JSON result, or a [`ProviderError`] whose shape mirrors what the backend
//! reported. Any backend exposing this operation set can stand in for Cognito.

pub mod cognito;

pub use cognito::CognitoClient;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Identity provider operations used by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    InitiateAuth,
    SignUp,
    ConfirmSignUp,
    ForgotPassword,
    ConfirmForgotPassword,
    ChangePassword,
    ResendConfirmationCode,
}

impl Operation {
    /// Wire name of the operation, as used in the `X-Amz-Target` header.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InitiateAuth => "InitiateAuth",
            Self::SignUp => "SignUp",
            Self::ConfirmSignUp => "ConfirmSignUp",
            Self::ForgotPassword => "ForgotPassword",
            Self::ConfirmForgotPassword => "ConfirmForgotPassword",
            Self::ChangePassword => "ChangePassword",
            Self::ResendConfirmationCode => "ResendConfirmationCode",
        }
    }
}

/// Error reported by an identity provider.
///
/// Every field is optional: providers (and transports) fill in different
/// subsets, and the gateway's normalizer decides which one wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{}", .message.as_deref().unwrap_or("identity provider error"))]
pub struct ProviderError {
    /// Human readable message (`message` or `Message`).
    pub message: Option<String>,
    /// Exception type tag (`__type`).
    pub type_tag: Option<String>,
    /// Generic error code (`code`).
    pub code: Option<String>,
    /// Status from transport metadata (`$metadata.httpStatusCode`).
    pub http_status_code: Option<u16>,
    /// Legacy status field (`statusCode`).
    pub status_code: Option<u16>,
}

impl ProviderError {
    /// Error raised before a provider response was received.
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::default()
        }
    }

    /// Read a provider error out of an arbitrary JSON value.
    ///
    /// Each field is extracted independently; a value of the wrong type (or a
    /// non-object value) simply leaves that field empty.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let text = |key: &str| {
            value
                .get(key)
                .and_then(Value::as_str)
                .filter(|text| !text.is_empty())
                .map(str::to_string)
        };

        Self {
            message: text("message").or_else(|| text("Message")),
            type_tag: text("__type"),
            code: text("code"),
            http_status_code: value
                .pointer("/$metadata/httpStatusCode")
                .and_then(status_from_value),
            status_code: value.get("statusCode").and_then(status_from_value),
        }
    }
}

fn status_from_value(value: &Value) -> Option<u16> {
    value
        .as_u64()
        .and_then(|status| u16::try_from(status).ok())
        .or_else(|| value.as_str().and_then(|status| status.trim().parse().ok()))
}

/// The operation set the gateway depends on.
///
/// Implementations perform exactly one network round trip per call and never
/// retry; timeouts and cancellation belong to the implementation's transport.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn initiate_auth(&self, params: Value) -> Result<Value, ProviderError>;

    async fn sign_up(&self, params: Value) -> Result<Value, ProviderError>;

    async fn confirm_sign_up(&self, params: Value) -> Result<Value, ProviderError>;

    async fn forgot_password(&self, params: Value) -> Result<Value, ProviderError>;

    async fn confirm_forgot_password(&self, params: Value) -> Result<Value, ProviderError>;

    async fn change_password(&self, params: Value) -> Result<Value, ProviderError>;

    async fn resend_confirmation_code(&self, params: Value) -> Result<Value, ProviderError>;
}

//! Credential requests accepted by the gateway.
//!
//! Every field is required. Field names follow the public JSON contract, which
//! is why `ChangePasswordRequest` carries a capitalized `AccessToken`.
//!
//! Missing or `null` fields deserialize as empty strings so [`Validate`] can
//! report them by name.

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} should not be empty")]
    Empty(&'static str),
    #[error("{0} must be an email")]
    InvalidEmail(&'static str),
}

/// Shape checks run before a request reaches the identity provider.
pub trait Validate {
    /// # Errors
    /// Returns the first field that fails validation.
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Basic email format check.
pub fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|re| re.is_match(email))
}

fn or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        Err(ValidationError::Empty(field))
    } else {
        Ok(())
    }
}

fn require_email(field: &'static str, value: &str) -> Result<(), ValidationError> {
    require(field, value)?;
    if valid_email(value) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail(field))
    }
}

#[derive(ToSchema, Serialize, Deserialize, Debug, Clone)]
pub struct SignInRequest {
    /// The email of the user
    #[schema(example = "user@example.com", required = true)]
    #[serde(default, deserialize_with = "or_empty")]
    pub email: String,
    /// The password of the user
    #[schema(example = "Password123", required = true)]
    #[serde(default, deserialize_with = "or_empty")]
    pub password: String,
}

impl Validate for SignInRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        require_email("email", &self.email)?;
        require("password", &self.password)
    }
}

#[derive(ToSchema, Serialize, Deserialize, Debug, Clone)]
pub struct SignUpRequest {
    /// The email of the user
    #[schema(example = "user@example.com", required = true)]
    #[serde(default, deserialize_with = "or_empty")]
    pub email: String,
    /// The password of the user
    #[schema(example = "Password123", required = true)]
    #[serde(default, deserialize_with = "or_empty")]
    pub password: String,
}

impl Validate for SignUpRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        require_email("email", &self.email)?;
        require("password", &self.password)
    }
}

#[derive(ToSchema, Serialize, Deserialize, Debug, Clone)]
pub struct ConfirmSignUpRequest {
    /// The email of the user
    #[schema(example = "user@example.com", required = true)]
    #[serde(default, deserialize_with = "or_empty")]
    pub email: String,
    /// The confirmation code
    #[schema(example = "123456", required = true)]
    #[serde(default, deserialize_with = "or_empty")]
    pub code: String,
}

impl Validate for ConfirmSignUpRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        require_email("email", &self.email)?;
        require("code", &self.code)
    }
}

#[derive(ToSchema, Serialize, Deserialize, Debug, Clone)]
pub struct ForgotPasswordRequest {
    /// The email of the user
    #[schema(example = "user@example.com", required = true)]
    #[serde(default, deserialize_with = "or_empty")]
    pub email: String,
}

impl Validate for ForgotPasswordRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        require_email("email", &self.email)
    }
}

#[derive(ToSchema, Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmForgotPasswordRequest {
    /// The email of the user
    #[schema(example = "user@example.com", required = true)]
    #[serde(default, deserialize_with = "or_empty")]
    pub email: String,
    /// The confirmation code
    #[schema(example = "123456", required = true)]
    #[serde(default, deserialize_with = "or_empty")]
    pub code: String,
    /// The new password
    #[schema(example = "Password123", required = true)]
    #[serde(default, deserialize_with = "or_empty")]
    pub new_password: String,
}

impl Validate for ConfirmForgotPasswordRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        require_email("email", &self.email)?;
        require("code", &self.code)?;
        require("newPassword", &self.new_password)
    }
}

#[derive(ToSchema, Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    /// The provider access token
    #[serde(rename = "AccessToken", default, deserialize_with = "or_empty")]
    #[schema(required = true)]
    pub access_token: String,
    /// The old password
    #[schema(example = "Password123", required = true)]
    #[serde(default, deserialize_with = "or_empty")]
    pub old_password: String,
    /// The new password
    #[schema(example = "Password123", required = true)]
    #[serde(default, deserialize_with = "or_empty")]
    pub new_password: String,
}

impl Validate for ChangePasswordRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        require("AccessToken", &self.access_token)?;
        require("oldPassword", &self.old_password)?;
        require("newPassword", &self.new_password)
    }
}

#[derive(ToSchema, Serialize, Deserialize, Debug, Clone)]
pub struct ResendConfirmationCodeRequest {
    /// The email of the user
    #[schema(example = "user@example.com", required = true)]
    #[serde(default, deserialize_with = "or_empty")]
    pub email: String,
}

impl Validate for ResendConfirmationCodeRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        require_email("email", &self.email)
    }
}

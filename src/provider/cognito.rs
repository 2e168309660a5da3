//! AWS Cognito User Pools client.
//!
//! Speaks the Cognito Identity Provider JSON 1.1 API directly over `reqwest`.
//! All operations used here are public app-client calls, so no request signing
//! is involved: the app client id travels in the parameters.

use super::{IdentityProvider, Operation, ProviderError};
use crate::APP_USER_AGENT;
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::{Client, header::CONTENT_TYPE};
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

const AMZ_JSON_1_1: &str = "application/x-amz-json-1.1";
const AMZ_TARGET_HEADER: &str = "X-Amz-Target";
const AMZN_ERROR_TYPE_HEADER: &str = "x-amzn-errortype";
const TARGET_PREFIX: &str = "AWSCognitoIdentityProviderService";

/// Cognito endpoint for a region.
#[must_use]
pub fn regional_endpoint(region: &str) -> String {
    format!("https://cognito-idp.{region}.amazonaws.com/")
}

#[derive(Debug, Clone)]
pub struct CognitoClient {
    client: Client,
    endpoint: Url,
}

impl CognitoClient {
    /// Build a client for `region`, or for `endpoint` when an override is given
    /// (local emulators, VPC endpoints).
    ///
    /// # Errors
    /// Returns an error if the region is empty, the endpoint is not a valid
    /// http(s) URL, or the HTTP client cannot be built.
    pub fn new(region: &str, endpoint: Option<&str>, timeout: Duration) -> Result<Self> {
        let region = region.trim();
        if region.is_empty() {
            return Err(anyhow!("Cognito region must not be empty"));
        }

        let endpoint = endpoint.map_or_else(|| regional_endpoint(region), str::to_string);
        let endpoint =
            Url::parse(&endpoint).with_context(|| format!("Invalid Cognito endpoint: {endpoint}"))?;

        match endpoint.scheme() {
            "http" | "https" => {}
            scheme => return Err(anyhow!("Unsupported Cognito endpoint scheme: {scheme}")),
        }

        let client = Client::builder()
            .user_agent(APP_USER_AGENT)
            .timeout(timeout)
            .build()
            .context("Failed to build Cognito HTTP client")?;

        Ok(Self { client, endpoint })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    /// Perform a single Cognito API call.
    #[instrument(skip(self, params), fields(operation = operation.as_str()))]
    async fn send(&self, operation: Operation, params: Value) -> Result<Value, ProviderError> {
        let body = serde_json::to_vec(&params).map_err(|err| {
            ProviderError::transport(format!("Failed to encode {} request: {err}", operation.as_str()))
        })?;

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, AMZ_JSON_1_1)
            .header(
                AMZ_TARGET_HEADER,
                format!("{TARGET_PREFIX}.{}", operation.as_str()),
            )
            .body(body)
            .send()
            .await
            .map_err(|err| ProviderError::transport(err.to_string()))?;

        let status = response.status();
        let error_type_header = response
            .headers()
            .get(AMZN_ERROR_TYPE_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let bytes = response
            .bytes()
            .await
            .map_err(|err| ProviderError::transport(err.to_string()))?;

        debug!("{} responded with {}", operation.as_str(), status);

        if status.is_success() {
            if bytes.is_empty() {
                return Ok(Value::Object(Map::new()));
            }

            return serde_json::from_slice(&bytes).map_err(|err| {
                ProviderError::transport(format!(
                    "Invalid {} response from Cognito: {err}",
                    operation.as_str()
                ))
            });
        }

        let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        let mut error = ProviderError::from_value(&body);
        error.type_tag = error
            .type_tag
            .or(error_type_header)
            .map(|tag| exception_name(&tag).to_string());
        error.http_status_code = Some(status.as_u16());

        Err(error)
    }
}

/// Cognito may qualify exception names with a namespace (`ns#Name`) or append
/// a documentation link (`Name:http://...`); keep the bare name.
fn exception_name(tag: &str) -> &str {
    let tag = tag.split(':').next().unwrap_or(tag);
    tag.rsplit('#').next().unwrap_or(tag).trim()
}

#[async_trait]
impl IdentityProvider for CognitoClient {
    async fn initiate_auth(&self, params: Value) -> Result<Value, ProviderError> {
        self.send(Operation::InitiateAuth, params).await
    }

    async fn sign_up(&self, params: Value) -> Result<Value, ProviderError> {
        self.send(Operation::SignUp, params).await
    }

    async fn confirm_sign_up(&self, params: Value) -> Result<Value, ProviderError> {
        self.send(Operation::ConfirmSignUp, params).await
    }

    async fn forgot_password(&self, params: Value) -> Result<Value, ProviderError> {
        self.send(Operation::ForgotPassword, params).await
    }

    async fn confirm_forgot_password(&self, params: Value) -> Result<Value, ProviderError> {
        self.send(Operation::ConfirmForgotPassword, params).await
    }

    async fn change_password(&self, params: Value) -> Result<Value, ProviderError> {
        self.send(Operation::ChangePassword, params).await
    }

    async fn resend_confirmation_code(&self, params: Value) -> Result<Value, ProviderError> {
        self.send(Operation::ResendConfirmationCode, params).await
    }
}

//! Credential routes.
//!
//! Each handler validates its body, calls the matching gateway operation once
//! and maps a failure to the uniform error body.

use super::{error::ApiError, error::ErrorBody, request_path, validated};
use crate::gateway::{
    AuthGateway, ChangePasswordRequest, ConfirmForgotPasswordRequest, ConfirmSignUpRequest,
    ConfirmationMessage, ForgotPasswordRequest, ResendConfirmationCodeRequest, SignInRequest,
    SignUpRequest,
};
use axum::{
    Json,
    extract::{Extension, OriginalUri, rejection::JsonRejection},
    http::StatusCode,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::instrument;

#[utoipa::path(
    post,
    path = "/auth/signin",
    request_body = SignInRequest,
    responses (
        (status = 200, description = "Signed session token", body = String, content_type = "text/plain"),
        (status = 400, description = "Invalid request or rejected credentials", body = ErrorBody),
        (status = 500, description = "Provider failure or authentication challenge", body = ErrorBody),
    ),
    tag = "authentication"
)]
#[instrument(skip_all)]
pub async fn sign_in(
    uri: OriginalUri,
    gateway: Extension<Arc<AuthGateway>>,
    payload: Result<Json<SignInRequest>, JsonRejection>,
) -> Result<String, ApiError> {
    let path = request_path(&uri);
    let request = validated(&path, payload)?;

    gateway
        .sign_in(&request)
        .await
        .map_err(|err| ApiError::gateway(&path, &err))
}

#[utoipa::path(
    post,
    path = "/auth/signup",
    request_body = SignUpRequest,
    responses (
        (status = 201, description = "User registered, provider result passed through"),
        (status = 400, description = "Invalid request or rejected registration", body = ErrorBody),
    ),
    tag = "authentication"
)]
#[instrument(skip_all)]
pub async fn sign_up(
    uri: OriginalUri,
    gateway: Extension<Arc<AuthGateway>>,
    payload: Result<Json<SignUpRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let path = request_path(&uri);
    let request = validated(&path, payload)?;

    let result = gateway
        .sign_up(&request)
        .await
        .map_err(|err| ApiError::gateway(&path, &err))?;

    Ok((StatusCode::CREATED, Json(result)))
}

#[utoipa::path(
    post,
    path = "/auth/confirm",
    request_body = ConfirmSignUpRequest,
    responses (
        (status = 200, description = "Confirmation code accepted", body = ConfirmationMessage),
        (status = 400, description = "Invalid request or code", body = ErrorBody),
    ),
    tag = "authentication"
)]
#[instrument(skip_all)]
pub async fn confirm_sign_up(
    uri: OriginalUri,
    gateway: Extension<Arc<AuthGateway>>,
    payload: Result<Json<ConfirmSignUpRequest>, JsonRejection>,
) -> Result<Json<ConfirmationMessage>, ApiError> {
    let path = request_path(&uri);
    let request = validated(&path, payload)?;

    gateway
        .confirm_sign_up(&request)
        .await
        .map(Json)
        .map_err(|err| ApiError::gateway(&path, &err))
}

#[utoipa::path(
    post,
    path = "/auth/forgot-password",
    request_body = ForgotPasswordRequest,
    responses (
        (status = 200, description = "Reset code sent, provider result passed through"),
        (status = 400, description = "Invalid request", body = ErrorBody),
    ),
    tag = "authentication"
)]
#[instrument(skip_all)]
pub async fn forgot_password(
    uri: OriginalUri,
    gateway: Extension<Arc<AuthGateway>>,
    payload: Result<Json<ForgotPasswordRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let path = request_path(&uri);
    let request = validated(&path, payload)?;

    gateway
        .forgot_password(&request)
        .await
        .map(Json)
        .map_err(|err| ApiError::gateway(&path, &err))
}

#[utoipa::path(
    post,
    path = "/auth/confirm-forgot-password",
    request_body = ConfirmForgotPasswordRequest,
    responses (
        (status = 200, description = "Password reset, provider result passed through"),
        (status = 400, description = "Invalid request or code", body = ErrorBody),
    ),
    tag = "authentication"
)]
#[instrument(skip_all)]
pub async fn confirm_forgot_password(
    uri: OriginalUri,
    gateway: Extension<Arc<AuthGateway>>,
    payload: Result<Json<ConfirmForgotPasswordRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let path = request_path(&uri);
    let request = validated(&path, payload)?;

    gateway
        .confirm_forgot_password(&request)
        .await
        .map(Json)
        .map_err(|err| ApiError::gateway(&path, &err))
}

#[utoipa::path(
    post,
    path = "/auth/change-password",
    request_body = ChangePasswordRequest,
    responses (
        (status = 200, description = "Password changed, provider result passed through"),
        (status = 400, description = "Invalid request or password", body = ErrorBody),
    ),
    tag = "authentication"
)]
#[instrument(skip_all)]
pub async fn change_password(
    uri: OriginalUri,
    gateway: Extension<Arc<AuthGateway>>,
    payload: Result<Json<ChangePasswordRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let path = request_path(&uri);
    let request = validated(&path, payload)?;

    gateway
        .change_password(&request)
        .await
        .map(Json)
        .map_err(|err| ApiError::gateway(&path, &err))
}

#[utoipa::path(
    post,
    path = "/auth/resend-confirmation-code",
    request_body = ResendConfirmationCodeRequest,
    responses (
        (status = 200, description = "Confirmation code resent, provider result passed through"),
        (status = 400, description = "Invalid request", body = ErrorBody),
    ),
    tag = "authentication"
)]
#[instrument(skip_all)]
pub async fn resend_confirmation_code(
    uri: OriginalUri,
    gateway: Extension<Arc<AuthGateway>>,
    payload: Result<Json<ResendConfirmationCodeRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let path = request_path(&uri);
    let request = validated(&path, payload)?;

    gateway
        .resend_confirmation_code(&request)
        .await
        .map(Json)
        .map_err(|err| ApiError::gateway(&path, &err))
}

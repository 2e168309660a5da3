//! API handlers and the helpers they share.
//!
//! Every failure leaves a handler as an [`error::ApiError`], so clients always
//! see the same error body whether the request was malformed, failed
//! validation, or was rejected by the identity provider.

pub mod auth;
pub mod error;
pub mod health;
pub mod user;

use crate::gateway::Validate;
use axum::{
    Json,
    extract::{OriginalUri, rejection::JsonRejection},
};
use error::ApiError;

/// Path (and query) the client asked for, before any nesting.
pub(crate) fn request_path(uri: &OriginalUri) -> String {
    uri.0
        .path_and_query()
        .map_or_else(|| uri.0.path().to_string(), ToString::to_string)
}

/// Unwrap a JSON body and run its shape checks.
pub(crate) fn validated<T: Validate>(
    path: &str,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, ApiError> {
    let Json(request) = payload.map_err(|rejection| ApiError::rejection(path, &rejection))?;
    request
        .validate()
        .map_err(|err| ApiError::validation(path, &err))?;
    Ok(request)
}

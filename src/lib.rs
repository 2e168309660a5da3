//! # Authgate (authentication gateway)
//!
//! `authgate` is a thin HTTP front end for a managed identity provider
//! (AWS Cognito User Pools). Every auth operation is forwarded as a single
//! provider round trip; the gateway only validates input, maps each request to
//! its provider call, normalizes provider failures into one error shape, and
//! mints a signed session token on sign-in.
//!
//! ## Layout
//!
//! - [`provider`]: the `IdentityProvider` seam and the Cognito client.
//! - [`gateway`]: request validation, the seven gateway operations, the error
//!   normalizer and the session token issuer.
//! - [`api`]: axum routes, the uniform JSON error body and the `OpenAPI` document.
//! - [`cli`]: argument parsing, telemetry and server startup.
//!
//! ## Sessions
//!
//! Session tokens are HS256 JWTs carrying `{email, token}` where `token` is the
//! provider access token. Nothing is stored server-side, so tokens cannot be
//! revoked before they expire.

pub mod api;
pub mod cli;
pub mod gateway;
pub mod provider;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

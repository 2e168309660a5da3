//! Session token issuer.
//!
//! Session tokens are HS256 JWTs signed with a process-wide secret. They carry
//! the user's email and the provider access token, plus `iat`/`exp`. There is
//! no server-side state, so a token stays valid until it expires.

use chrono::Utc;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::{Error as JwtError, ErrorKind},
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

pub const DEFAULT_SESSION_TTL_SECONDS: i64 = 60 * 60;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session signing secret must not be empty")]
    EmptySecret,
    #[error("session ttl must be positive, got {0}")]
    InvalidTtl(i64),
    #[error("failed to sign session token")]
    Signing(#[source] JwtError),
    #[error("session token expired")]
    Expired,
    #[error("invalid session token")]
    Invalid(#[source] JwtError),
}

/// Claims carried by a session token.
#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SessionClaims {
    /// Email the user signed in with
    pub email: String,
    /// Identity provider access token
    pub token: String,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expiration (unix seconds)
    pub exp: i64,
}

pub struct SessionIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_seconds: i64,
}

impl SessionIssuer {
    /// # Errors
    /// Returns an error if the secret is empty or the TTL is not positive.
    pub fn new(secret: &SecretString, ttl_seconds: i64) -> Result<Self, SessionError> {
        let secret = secret.expose_secret().as_bytes();
        if secret.is_empty() {
            return Err(SessionError::EmptySecret);
        }
        if ttl_seconds <= 0 {
            return Err(SessionError::InvalidTtl(ttl_seconds));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iat"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl_seconds,
        })
    }

    #[must_use]
    pub fn ttl_seconds(&self) -> i64 {
        self.ttl_seconds
    }

    /// Sign a session token for `email` embedding the provider `access_token`.
    ///
    /// # Errors
    /// Returns an error if signing fails.
    pub fn issue(&self, email: &str, access_token: &str) -> Result<String, SessionError> {
        self.issue_at(email, access_token, Utc::now().timestamp())
    }

    fn issue_at(&self, email: &str, access_token: &str, now: i64) -> Result<String, SessionError> {
        let claims = SessionClaims {
            email: email.to_string(),
            token: access_token.to_string(),
            iat: now,
            exp: now.saturating_add(self.ttl_seconds),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(SessionError::Signing)
    }

    /// Verify a session token and return its claims.
    ///
    /// # Errors
    /// Returns [`SessionError::Expired`] for expired tokens and
    /// [`SessionError::Invalid`] for anything else that fails verification.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, SessionError> {
        decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|err| match err.kind() {
                ErrorKind::ExpiredSignature => SessionError::Expired,
                _ => SessionError::Invalid(err),
            })
    }
}

impl std::fmt::Debug for SessionIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionIssuer")
            .field("keys", &"***")
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}

//! Provider error normalization.

use crate::provider::ProviderError;

/// Message used when the provider did not supply one.
pub const FALLBACK_MESSAGE: &str = "Internal server error";

/// Status used when the provider did not supply a usable one.
pub const FALLBACK_STATUS: u16 = 500;

/// Uniform view of a provider failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedError {
    pub message: String,
    pub code: Option<String>,
    pub http_status: u16,
}

/// Normalize a provider error.
///
/// Message, code and status are extracted independently and never fail:
/// - message: `message`, else [`FALLBACK_MESSAGE`]
/// - code: the type tag, else `code`, else none
/// - status: `$metadata.httpStatusCode`, else `statusCode`, else [`FALLBACK_STATUS`]
///
/// Status candidates outside `200..=599` are skipped.
#[must_use]
pub fn normalize(error: &ProviderError) -> NormalizedError {
    let message = error
        .message
        .as_deref()
        .filter(|message| !message.is_empty())
        .unwrap_or(FALLBACK_MESSAGE)
        .to_string();

    let code = error
        .type_tag
        .as_deref()
        .filter(|tag| !tag.is_empty())
        .or_else(|| error.code.as_deref().filter(|code| !code.is_empty()))
        .map(str::to_string);

    let http_status = error
        .http_status_code
        .filter(|status| is_http_status(*status))
        .or_else(|| error.status_code.filter(|status| is_http_status(*status)))
        .unwrap_or(FALLBACK_STATUS);

    NormalizedError {
        message,
        code,
        http_status,
    }
}

fn is_http_status(status: u16) -> bool {
    (200..=599).contains(&status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_error_degrades_to_defaults() {
        let normalized = normalize(&ProviderError::default());
        assert_eq!(
            normalized,
            NormalizedError {
                message: FALLBACK_MESSAGE.to_string(),
                code: None,
                http_status: 500,
            }
        );
    }

    #[test]
    fn throttling_error_keeps_status_and_type() {
        let error = ProviderError::from_value(&json!({
            "__type": "TooManyRequestsException",
            "$metadata": { "httpStatusCode": 429 }
        }));

        let normalized = normalize(&error);
        assert_eq!(normalized.http_status, 429);
        assert_eq!(normalized.code.as_deref(), Some("TooManyRequestsException"));
        assert_eq!(normalized.message, FALLBACK_MESSAGE);
    }

    #[test]
    fn type_tag_wins_over_code() {
        let error = ProviderError {
            type_tag: Some("NotAuthorizedException".to_string()),
            code: Some("Generic".to_string()),
            ..ProviderError::default()
        };
        assert_eq!(
            normalize(&error).code.as_deref(),
            Some("NotAuthorizedException")
        );

        let error = ProviderError {
            type_tag: Some(String::new()),
            code: Some("Generic".to_string()),
            ..ProviderError::default()
        };
        assert_eq!(normalize(&error).code.as_deref(), Some("Generic"));
    }

    #[test]
    fn metadata_status_wins_over_legacy_status() {
        let error = ProviderError {
            http_status_code: Some(400),
            status_code: Some(503),
            ..ProviderError::default()
        };
        assert_eq!(normalize(&error).http_status, 400);

        let error = ProviderError {
            status_code: Some(503),
            ..ProviderError::default()
        };
        assert_eq!(normalize(&error).http_status, 503);
    }

    #[test]
    fn out_of_range_status_is_skipped() {
        let error = ProviderError {
            http_status_code: Some(0),
            status_code: Some(404),
            ..ProviderError::default()
        };
        assert_eq!(normalize(&error).http_status, 404);

        let error = ProviderError {
            http_status_code: Some(1000),
            ..ProviderError::default()
        };
        assert_eq!(normalize(&error).http_status, 500);

        for informational in [100, 101, 199] {
            let error = ProviderError {
                http_status_code: Some(informational),
                ..ProviderError::default()
            };
            assert_eq!(normalize(&error).http_status, 500);
        }

        let error = ProviderError {
            http_status_code: Some(600),
            status_code: Some(599),
            ..ProviderError::default()
        };
        assert_eq!(normalize(&error).http_status, 599);
    }

    #[test]
    fn code_mismatch_from_aws_sdk_shape() {
        let error = ProviderError::from_value(&json!({
            "message": "Invalid code",
            "code": "CodeMismatchException",
            "$metadata": { "httpStatusCode": 400 }
        }));

        assert_eq!(
            normalize(&error),
            NormalizedError {
                message: "Invalid code".to_string(),
                code: Some("CodeMismatchException".to_string()),
                http_status: 400,
            }
        );
    }
}

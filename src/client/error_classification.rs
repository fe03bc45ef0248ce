//! Error classification logic

use crate::error::ApiError;

/// Map a non-2xx status and its resolved message onto the [`ApiError`] taxonomy.
///
/// An empty message falls back to the class default. `retry_after` is only
/// kept for 429 and `body` only for the generic class.
pub fn classify_status(
    status: u16,
    message: impl Into<String>,
    retry_after: Option<u64>,
    body: Option<String>,
) -> ApiError {
    let message = message.into();
    let or_default = |default: &str| {
        if message.trim().is_empty() {
            default.to_string()
        } else {
            message.clone()
        }
    };

    match status {
        401 => ApiError::Authentication {
            message: or_default("Invalid or expired token"),
        },
        403 => ApiError::Permission {
            message: or_default("Permission denied"),
        },
        404 => ApiError::NotFound {
            message: or_default("Resource not found"),
        },
        429 => ApiError::RateLimit {
            message: or_default("Rate limit exceeded"),
            retry_after,
        },
        400 => ApiError::Validation {
            message: or_default("Invalid request parameters"),
        },
        s if s >= 500 => ApiError::Server {
            message: or_default("Coda server error"),
            status: s,
        },
        s => ApiError::Generic {
            message: or_default(&format!("HTTP {}", s)),
            status: s,
            body,
        },
    }
}

/// Parse `Retry-After: <seconds>`; the HTTP-date form is not honoured.
pub fn parse_retry_after(raw: Option<&str>) -> Option<u64> {
    raw?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_status_mapping() {
        assert!(matches!(classify_status(401, "x", None, None), ApiError::Authentication { .. }));
        assert!(matches!(classify_status(403, "x", None, None), ApiError::Permission { .. }));
        assert!(matches!(classify_status(404, "x", None, None), ApiError::NotFound { .. }));
        assert!(matches!(classify_status(429, "x", None, None), ApiError::RateLimit { .. }));
        assert!(matches!(classify_status(400, "x", None, None), ApiError::Validation { .. }));
    }

    #[test]
    fn test_server_errors_keep_status() {
        for status in [500u16, 502, 503, 504] {
            let err = classify_status(status, "upstream down", None, None);
            assert_eq!(
                err,
                ApiError::Server {
                    message: "upstream down".into(),
                    status
                }
            );
        }
    }

    #[test]
    fn test_other_statuses_are_generic() {
        let err = classify_status(409, "conflict", None, Some("{\"raw\":1}".into()));
        assert_eq!(err.status(), 409);
        match err {
            ApiError::Generic { body, .. } => assert_eq!(body.as_deref(), Some("{\"raw\":1}")),
            other => panic!("expected generic, got {:?}", other),
        }
    }

    #[test]
    fn test_defaults_when_message_empty() {
        assert_eq!(
            classify_status(401, "", None, None).message(),
            "Invalid or expired token"
        );
        assert_eq!(classify_status(403, " ", None, None).message(), "Permission denied");
        assert_eq!(classify_status(404, "", None, None).message(), "Resource not found");
        assert_eq!(
            classify_status(400, "", None, None).message(),
            "Invalid request parameters"
        );
    }

    #[test]
    fn test_retry_after_only_on_rate_limit() {
        assert_eq!(classify_status(429, "slow", Some(7), None).retry_after(), Some(7));
        assert_eq!(classify_status(429, "slow", None, None).retry_after(), None);
        assert_eq!(classify_status(503, "busy", Some(7), None).retry_after(), None);
    }

    #[test]
    fn test_parse_retry_after() {
        assert_eq!(parse_retry_after(Some("12")), Some(12));
        assert_eq!(parse_retry_after(Some(" 3 ")), Some(3));
        assert_eq!(parse_retry_after(Some("Wed, 21 Oct 2015 07:28:00 GMT")), None);
        assert_eq!(parse_retry_after(None), None);
    }
}

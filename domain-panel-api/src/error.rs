use serde::{Deserialize, Serialize};

/// Message shown to operators when the server response carries nothing safe to display.
pub const GENERIC_ERROR_MESSAGE: &str =
    "Something went wrong. Please try again or contact the administrator.";

/// Unified error type for all back-office API calls.
///
/// Every variant is serializable so the error can be forwarded to a UI layer
/// unchanged. The `Display` output is meant for logs; use
/// [`display_message`](Self::display_message) for operator-facing text.
///
/// # Retryable Errors
///
/// The following variants represent transient failures that may succeed on retry:
/// - [`NetworkError`](Self::NetworkError): connectivity issues
/// - [`Gateway`](Self::Gateway): HTTP 502/503/504
/// - [`Timeout`](Self::Timeout): request timed out
/// - [`RateLimited`](Self::RateLimited): HTTP 429
///
/// The built-in HTTP client retries these for idempotent requests only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ApiError {
    /// A network-level error occurred (DNS resolution failure, connection refused).
    NetworkError {
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    Timeout {
        /// Error details.
        detail: String,
    },

    /// The API rate limit has been exceeded (HTTP 429).
    RateLimited {
        /// Suggested wait time in seconds, taken from `Retry-After`.
        retry_after: Option<u64>,
        /// Raw response body, if any.
        raw_message: Option<String>,
    },

    /// The access token is missing, expired or revoked (HTTP 401).
    Unauthorized {
        /// First server-side error message, if available.
        raw_message: Option<String>,
    },

    /// The token is valid but lacks permission for this operation (HTTP 403).
    Forbidden {
        /// First server-side error message, if available.
        raw_message: Option<String>,
    },

    /// The addressed resource does not exist (HTTP 404).
    NotFound {
        /// Request path that produced the 404.
        path: String,
        /// First server-side error message, if available.
        raw_message: Option<String>,
    },

    /// The server rejected the request (HTTP 400/409/422 and other 4xx).
    Validation {
        /// HTTP status code.
        status: u16,
        /// Error messages returned in the `errors` array of the response body.
        errors: Vec<String>,
    },

    /// A proxy in front of the API could not reach it (HTTP 502/503/504).
    Gateway {
        /// HTTP status code.
        status: u16,
        /// Raw response body, kept for debugging only.
        raw_message: Option<String>,
    },

    /// The server failed to process the request (HTTP 5xx other than gateway errors).
    ServerError {
        /// HTTP status code.
        status: u16,
        /// Raw response body, kept for debugging only.
        raw_message: Option<String>,
    },

    /// Failed to parse the API response.
    ParseError {
        /// Details about the parse failure.
        detail: String,
    },

    /// Failed to build a request body.
    SerializationError {
        /// Details about the serialization failure.
        detail: String,
    },

    /// An unrecognized failure.
    Unknown {
        /// HTTP status code, if a response was received.
        status: Option<u16>,
        /// Raw error message.
        raw_message: String,
    },
}

impl ApiError {
    /// Whether this is expected behavior (bad input, missing resource, expired token),
    /// used for log classification.
    ///
    /// Use `warn` when this returns `true` and `error` when it returns `false`.
    /// **Update this method whenever a variant is added.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::Unauthorized { .. }
                | Self::Forbidden { .. }
                | Self::NotFound { .. }
                | Self::Validation { .. }
        )
    }

    /// Whether the request may succeed if sent again unchanged.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::NetworkError { .. }
                | Self::Timeout { .. }
                | Self::RateLimited { .. }
                | Self::Gateway { .. }
        )
    }

    /// HTTP status code attached to this error, if a response was received.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RateLimited { .. } => Some(429),
            Self::Unauthorized { .. } => Some(401),
            Self::Forbidden { .. } => Some(403),
            Self::NotFound { .. } => Some(404),
            Self::Validation { status, .. }
            | Self::Gateway { status, .. }
            | Self::ServerError { status, .. } => Some(*status),
            Self::Unknown { status, .. } => *status,
            Self::NetworkError { .. }
            | Self::Timeout { .. }
            | Self::ParseError { .. }
            | Self::SerializationError { .. } => None,
        }
    }

    /// Operator-facing message.
    ///
    /// - 5xx: generic message, internal details stay in the logs.
    /// - 4xx: first error returned by the API when available.
    /// - otherwise the error's own message, falling back to the generic one.
    #[must_use]
    pub fn display_message(&self) -> String {
        if self.status().is_some_and(|s| s >= 500) {
            return GENERIC_ERROR_MESSAGE.to_string();
        }

        let first_error = match self {
            Self::Validation { errors, .. } => errors.first().cloned(),
            Self::Unauthorized { raw_message }
            | Self::Forbidden { raw_message }
            | Self::NotFound { raw_message, .. } => raw_message.clone(),
            _ => None,
        };
        if let Some(msg) = first_error.filter(|m| !m.is_empty()) {
            return msg;
        }

        let own = self.to_string();
        if own.is_empty() {
            GENERIC_ERROR_MESSAGE.to_string()
        } else {
            own
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { detail } => write!(f, "Network error: {detail}"),
            Self::Timeout { detail } => write!(f, "Request timeout: {detail}"),
            Self::RateLimited { retry_after, .. } => {
                if let Some(secs) = retry_after {
                    write!(f, "Rate limited (retry after {secs}s)")
                } else {
                    write!(f, "Rate limited")
                }
            }
            Self::Unauthorized { .. } => write!(f, "Session expired or invalid token"),
            Self::Forbidden { .. } => write!(f, "Permission denied"),
            Self::NotFound { path, .. } => write!(f, "Resource '{path}' not found"),
            Self::Validation { status, errors } => match errors.first() {
                Some(first) => write!(f, "Request rejected (HTTP {status}): {first}"),
                None => write!(f, "Request rejected (HTTP {status})"),
            },
            Self::Gateway { status, .. } => write!(f, "Gateway error (HTTP {status})"),
            Self::ServerError { status, .. } => write!(f, "Server error (HTTP {status})"),
            Self::ParseError { detail } => write!(f, "Parse error: {detail}"),
            Self::SerializationError { detail } => write!(f, "Serialization error: {detail}"),
            Self::Unknown { raw_message, .. } => write!(f, "{raw_message}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Convenience type alias for `Result<T, ApiError>`.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_rate_limited_with_retry() {
        let e = ApiError::RateLimited {
            retry_after: Some(30),
            raw_message: None,
        };
        assert_eq!(e.to_string(), "Rate limited (retry after 30s)");
    }

    #[test]
    fn display_not_found() {
        let e = ApiError::NotFound {
            path: "domains/42".to_string(),
            raw_message: None,
        };
        assert_eq!(e.to_string(), "Resource 'domains/42' not found");
    }

    #[test]
    fn display_validation_uses_first_error() {
        let e = ApiError::Validation {
            status: 422,
            errors: vec!["years must be positive".into(), "second".into()],
        };
        assert_eq!(
            e.to_string(),
            "Request rejected (HTTP 422): years must be positive"
        );
    }

    #[test]
    fn display_message_hides_server_errors() {
        let e = ApiError::ServerError {
            status: 500,
            raw_message: Some("stack trace at ...".into()),
        };
        assert_eq!(e.display_message(), GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn display_message_hides_unknown_5xx() {
        let e = ApiError::Unknown {
            status: Some(507),
            raw_message: "insufficient storage".into(),
        };
        assert_eq!(e.display_message(), GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn gateway_errors_keep_status_and_hide_body() {
        let e = ApiError::Gateway {
            status: 503,
            raw_message: Some("upstream 10.0.0.5:8443 refused".into()),
        };
        assert_eq!(e.status(), Some(503));
        assert!(e.is_retryable());
        assert_eq!(e.to_string(), "Gateway error (HTTP 503)");
        assert_eq!(e.display_message(), GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn display_message_prefers_first_api_error() {
        let e = ApiError::Validation {
            status: 400,
            errors: vec!["Name servers must be unique".into()],
        };
        assert_eq!(e.display_message(), "Name servers must be unique");
    }

    #[test]
    fn display_message_falls_back_to_own_message() {
        let e = ApiError::Validation {
            status: 400,
            errors: vec![],
        };
        assert_eq!(e.display_message(), "Request rejected (HTTP 400)");

        let e = ApiError::NetworkError {
            detail: "connection refused".into(),
        };
        assert_eq!(e.display_message(), "Network error: connection refused");
    }

    #[test]
    fn unauthorized_uses_server_message() {
        let e = ApiError::Unauthorized {
            raw_message: Some("Token expired".into()),
        };
        assert_eq!(e.display_message(), "Token expired");
    }

    #[test]
    fn retryable_classification() {
        assert!(ApiError::Timeout { detail: "t".into() }.is_retryable());
        assert!(
            ApiError::RateLimited {
                retry_after: None,
                raw_message: None
            }
            .is_retryable()
        );
        assert!(!ApiError::Forbidden { raw_message: None }.is_retryable());
        assert!(
            !ApiError::ServerError {
                status: 500,
                raw_message: None
            }
            .is_retryable()
        );
    }

    #[test]
    fn expected_classification() {
        assert!(
            ApiError::NotFound {
                path: "x".into(),
                raw_message: None
            }
            .is_expected()
        );
        assert!(!ApiError::ParseError { detail: "x".into() }.is_expected());
    }

    #[test]
    fn serialize_tagged() {
        let e = ApiError::Validation {
            status: 422,
            errors: vec!["bad".into()],
        };
        let json = serde_json::to_string(&e).unwrap();
        assert!(json.contains("\"code\":\"Validation\""));
        assert!(json.contains("\"status\":422"));
    }
}

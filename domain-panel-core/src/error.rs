//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use domain_panel_api::ApiError;

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Domain not found
    #[error("Domain not found: {0}")]
    DomainNotFound(String),

    /// Domain group not found
    #[error("Domain group not found: {0}")]
    GroupNotFound(i64),

    /// cPanel account not found
    #[error("cPanel account not found: {0}")]
    CpanelNotFound(i64),

    /// Input rejected before reaching the API
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Lifecycle action that does not apply to the domain's current state
    #[error("Cannot {action} {domain}: {reason}")]
    ActionNotAvailable {
        domain: String,
        action: String,
        reason: String,
    },

    /// API error (converted from the client library)
    #[error("{0}")]
    Api(#[from] ApiError),
}

impl CoreError {
    /// Whether it is expected behavior (user input, missing resource, etc.), used for log classification.
    ///
    /// Use `warn` when this returns `true` and `error` otherwise.
    /// **Update this method whenever a variant is added.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::DomainNotFound(_)
            | Self::GroupNotFound(_)
            | Self::CpanelNotFound(_)
            | Self::ValidationError(_)
            | Self::ActionNotAvailable { .. } => true,
            Self::Api(e) => e.is_expected(),
        }
    }

    /// Text safe to show to an operator.
    #[must_use]
    pub fn display_message(&self) -> String {
        match self {
            Self::Api(e) => e.display_message(),
            other => other.to_string(),
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_errors_keep_their_classification() {
        let e: CoreError = ApiError::Forbidden { raw_message: None }.into();
        assert!(e.is_expected());

        let e: CoreError = ApiError::ServerError {
            status: 500,
            raw_message: Some("trace".into()),
        }
        .into();
        assert!(!e.is_expected());
        assert_eq!(e.display_message(), domain_panel_api::GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn action_not_available_message() {
        let e = CoreError::ActionNotAvailable {
            domain: "example.com".into(),
            action: "renew".into(),
            reason: "domain has expired, reactivate it instead".into(),
        };
        assert_eq!(
            e.display_message(),
            "Cannot renew example.com: domain has expired, reactivate it instead"
        );
    }

    #[test]
    fn serializes_with_code_tag() {
        let json = serde_json::to_value(CoreError::GroupNotFound(4)).unwrap();
        assert_eq!(json["code"], "GroupNotFound");
        assert_eq!(json["details"], 4);
    }
}

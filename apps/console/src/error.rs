//! # Console Error Type
//!
//! Unified error type for the command flows.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Console                            │
//! │                                                                         │
//! │  Flow Function                                                          │
//! │  Result<Screen, ConsoleError>                                           │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Client Error? ─── ClientError::Status { 500, .. } ──┐                  │
//! │         │                                            │                  │
//! │         ▼                                            ▼                  │
//! │  Validation Error? ── CoreError::Validation ───► ConsoleError ────►     │
//! │         │                                         { code, message }     │
//! │         ▼                                                               │
//! │  Success ──► Screen                                                     │
//! │                                                                         │
//! │  What the operator reads is `user_message()`: every API failure        │
//! │  (4xx or 5xx) collapses into the same generic text.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use depot_client::ClientError;
use depot_core::{CoreError, ValidationError};
use serde::Serialize;

/// Generic text shown for any failed API call.
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

/// Error returned from console flows.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsoleError {
    /// Machine-readable category
    pub code: ErrorCode,
    /// Detailed message for logs
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// No token; the operator must log in
    Unauthenticated,
    /// Form input failed the required checks
    ValidationError,
    /// The catalog API failed or was unreachable
    ApiError,
    /// Configuration could not be loaded or is invalid
    ConfigError,
    /// Anything else
    Internal,
}

/// Result type for console flows.
pub type ConsoleResult<T> = Result<T, ConsoleError>;

impl ConsoleError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ConsoleError {
            code,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ConsoleError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ConsoleError::new(ErrorCode::Internal, message)
    }

    /// Text safe to show the operator.
    pub fn user_message(&self) -> String {
        match self {
            ConsoleError { code: ErrorCode::ApiError, .. } => GENERIC_FAILURE.to_string(),
            ConsoleError { code: ErrorCode::Unauthenticated, .. } => "Please log in to continue.".to_string(),
            other => other.message.clone(),
        }
    }
}

impl From<ClientError> for ConsoleError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::MissingToken => ConsoleError::new(ErrorCode::Unauthenticated, err.to_string()),
            e if e.is_config_error() => ConsoleError::new(ErrorCode::ConfigError, e.to_string()),
            ClientError::TokenStorage(msg) => ConsoleError::internal(format!("Token storage error: {}", msg)),
            e => {
                tracing::error!(error = %e, "Catalog API call failed");
                ConsoleError::new(ErrorCode::ApiError, e.to_string())
            }
        }
    }
}

impl From<CoreError> for ConsoleError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(e) => ConsoleError::validation(e.to_string()),
            e @ CoreError::UnsupportedSortKey { .. } => ConsoleError::validation(e.to_string()),
        }
    }
}

impl From<ValidationError> for ConsoleError {
    fn from(err: ValidationError) -> Self {
        ConsoleError::validation(err.to_string())
    }
}

impl std::fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ConsoleError {}

#[cfg(test)]
mod tests {
    use super::*;
    use depot_core::{ResourceKind, SortKey};

    #[test]
    fn test_api_failures_share_generic_message() {
        let not_found: ConsoleError = ClientError::Status {
            status: 404,
            message: "Not Found".into(),
        }
        .into();
        let server: ConsoleError = ClientError::Status {
            status: 500,
            message: "boom".into(),
        }
        .into();

        assert_eq!(not_found.code, ErrorCode::ApiError);
        assert_eq!(not_found.user_message(), server.user_message());
        assert_eq!(server.user_message(), GENERIC_FAILURE);
    }

    #[test]
    fn test_conversions() {
        let err: ConsoleError = ClientError::MissingToken.into();
        assert_eq!(err.code, ErrorCode::Unauthenticated);

        let err: ConsoleError = ClientError::InvalidUrl("x".into()).into();
        assert_eq!(err.code, ErrorCode::ConfigError);

        let err: ConsoleError = CoreError::UnsupportedSortKey {
            kind: ResourceKind::State,
            key: SortKey::City,
        }
        .into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.user_message(), "State table cannot be sorted by city");
    }

    #[test]
    fn test_display_includes_code() {
        let err = ConsoleError::validation("name is required");
        assert_eq!(err.to_string(), "[ValidationError] name is required");
    }
}

//! # Client Error Types
//!
//! Error types for everything depot-client does: HTTP calls, token storage
//! and configuration.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Client Error Categories                           │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Transport     │  │     Session             │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Transport      │  │  MissingToken           │ │
//! │  │  InvalidUrl     │  │  Status         │  │  TokenStorage           │ │
//! │  │  ConfigLoad/Save│  │  Decode         │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Every failure depot-client can report.
#[derive(Debug, Error)]
pub enum ClientError {
    // =========================================================================
    // Session Errors
    // =========================================================================
    /// No bearer token in persistent or session storage.
    #[error("No auth token available. Log in first.")]
    MissingToken,

    /// Reading or writing the token file failed.
    #[error("Token storage error: {0}")]
    TokenStorage(String),

    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// The request never produced a response (connection refused, DNS, TLS).
    #[error("Request failed: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status.
    #[error("Server returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body was not the expected JSON shape.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid API base URL.
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            ClientError::Status {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::InvalidUrl(err.to_string())
    }
}

impl From<toml::de::Error> for ClientError {
    fn from(err: toml::de::Error) -> Self {
        ClientError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ClientError {
    fn from(err: toml::ser::Error) -> Self {
        ClientError::ConfigSaveFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl ClientError {
    /// Returns true if the server was reached and answered with an error status.
    pub fn is_http_status(&self) -> bool {
        matches!(self, ClientError::Status { .. })
    }

    /// Returns true for 401/403 answers.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Status { status: 401 | 403, .. })
    }

    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            ClientError::InvalidConfig(_)
                | ClientError::InvalidUrl(_)
                | ClientError::ConfigLoadFailed(_)
                | ClientError::ConfigSaveFailed(_)
        )
    }
}

//! # Error Types
//!
//! Domain-specific error types for depot-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  depot-core errors (this file)                                         │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Form input failures                            │
//! │                                                                         │
//! │  depot-client errors (separate crate)                                  │
//! │  └── ClientError      - HTTP, token storage, config failures           │
//! │                                                                         │
//! │  Console errors (in app)                                               │
//! │  └── ConsoleError     - What the operator sees                         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ConsoleError → terminal           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::resource::{ResourceKind, SortKey};

// =============================================================================
// Core Error
// =============================================================================

/// Domain errors raised by the pure catalog logic.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The list view was asked to sort on a column the resource does not have.
    ///
    /// ## When This Occurs
    /// - `--sort code` on the Warehouse table (warehouses carry no code)
    /// - `--sort city` on the State table
    #[error("{kind} table cannot be sorted by {key}")]
    UnsupportedSortKey { kind: ResourceKind, key: SortKey },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Form validation errors.
///
/// Forms only enforce "required" presence, plus the dependent-select rule
/// that a Warehouse's City is one of the selected State's Cities.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// The chosen City does not belong to the chosen State.
    #[error("City {city} is not in the cities of state {state}")]
    CityNotInState { city: String, state: String },

    /// Password and confirmation differ.
    #[error("Passwords do not match")]
    PasswordMismatch,
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::UnsupportedSortKey {
            kind: ResourceKind::Warehouse,
            key: SortKey::Code,
        };
        assert_eq!(err.to_string(), "Warehouse table cannot be sorted by code");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");
        assert_eq!(
            ValidationError::PasswordMismatch.to_string(),
            "Passwords do not match"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "code".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}

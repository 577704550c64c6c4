//! # Validation Module
//!
//! Input checks run by the forms before anything is sent.
//!
//! The console deliberately checks very little: presence of required
//! fields, and on the reset-password page that both password entries agree.
//! Uniqueness, formats and referential integrity are the server's job.
//!
//! ## Usage
//! ```rust
//! use depot_core::validation::require;
//!
//! assert_eq!(require("name", "  Ohio ").unwrap(), "Ohio");
//! assert!(require("code", "   ").is_err());
//! ```

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Checks that a required text field is present, returning it trimmed.
pub fn require(field: &str, value: &str) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Ok(value.to_string())
}

/// Validates a login form.
pub fn validate_login(email: &str, password: &str) -> ValidationResult<(String, String)> {
    let email = require("email", email)?;
    if password.is_empty() {
        return Err(ValidationError::Required {
            field: "password".to_string(),
        });
    }
    Ok((email, password.to_string()))
}

/// Validates the reset-password form and returns the new password.
///
/// Passwords are compared exactly; surrounding whitespace is significant.
pub fn validate_password_reset(token: &str, password: &str, confirm: &str) -> ValidationResult<String> {
    require("token", token)?;

    if password.is_empty() {
        return Err(ValidationError::Required {
            field: "password".to_string(),
        });
    }

    if password != confirm {
        return Err(ValidationError::PasswordMismatch);
    }

    Ok(password.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require() {
        assert_eq!(require("name", "Ohio").unwrap(), "Ohio");
        assert_eq!(require("name", "  Ohio  ").unwrap(), "Ohio");
        assert!(matches!(
            require("name", ""),
            Err(ValidationError::Required { field }) if field == "name"
        ));
        assert!(require("name", " \t ").is_err());
    }

    #[test]
    fn test_validate_login() {
        let (email, password) = validate_login(" ops@example.com ", "secret").unwrap();
        assert_eq!(email, "ops@example.com");
        assert_eq!(password, "secret");
        assert!(validate_login("", "secret").is_err());
        assert!(validate_login("ops@example.com", "").is_err());
    }

    #[test]
    fn test_validate_password_reset() {
        assert_eq!(validate_password_reset("tok", "hunter2", "hunter2").unwrap(), "hunter2");
        assert!(matches!(
            validate_password_reset("tok", "hunter2", "hunter3"),
            Err(ValidationError::PasswordMismatch)
        ));
        assert!(validate_password_reset("", "a", "a").is_err());
        assert!(validate_password_reset("tok", "", "").is_err());
    }
}

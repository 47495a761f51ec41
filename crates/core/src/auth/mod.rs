//! Authentication and password hashing.
//!
//! This module provides:
//! - Password hashing with Argon2id
//! - Password verification
//! - Credential validation and authentication errors

mod password;

pub use password::{PasswordError, hash_password, verify_password, verify_password_or_dummy};

use thiserror::Error;

use tally_shared::AppError;

/// Errors raised by the authentication gate.
#[derive(Debug, Error)]
pub enum AuthError {
    /// An account with this name already exists.
    #[error("Name '{0}' is already taken")]
    DuplicateName(String),

    /// Unknown name or wrong password.
    #[error("Invalid name or password")]
    InvalidCredentials,

    /// No live session accompanies the request.
    #[error("Not authenticated")]
    NotAuthenticated,

    /// Form input rejected before touching storage.
    #[error("{0}")]
    Validation(String),

    /// Password hashing failed.
    #[error(transparent)]
    Password(#[from] PasswordError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl AuthError {
    /// Returns the error code for logs and API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateName(_) => "DUPLICATE_NAME",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::NotAuthenticated => "NOT_AUTHENTICATED",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Password(_) => "PASSWORD_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        let message = err.to_string();
        match err {
            AuthError::DuplicateName(_) => Self::Conflict(message),
            AuthError::InvalidCredentials | AuthError::NotAuthenticated => {
                Self::Unauthorized(message)
            }
            AuthError::Validation(_) => Self::Validation(message),
            AuthError::Password(_) => Self::Internal(message),
            AuthError::Database(_) => Self::Database(message),
        }
    }
}

/// Longest accepted account name, in characters.
pub const MAX_NAME_LEN: usize = 100;

/// Checks a name/password pair submitted by the register form.
///
/// Names and passwords have no format or strength rules; they only have to
/// be non-blank, and a name must fit its column.
///
/// # Errors
///
/// Returns `AuthError::Validation` when either field is blank or the trimmed
/// name is longer than [`MAX_NAME_LEN`] characters.
pub fn validate_registration(name: &str, password: &str) -> Result<(), AuthError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AuthError::Validation("Name is required".to_string()));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(AuthError::Validation(format!(
            "Name must be at most {MAX_NAME_LEN} characters"
        )));
    }
    if password.is_empty() {
        return Err(AuthError::Validation("Password is required".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_registration() {
        assert!(validate_registration("alice", "pw1").is_ok());
        assert!(validate_registration("a", " ").is_ok());
        assert!(matches!(
            validate_registration("   ", "pw1"),
            Err(AuthError::Validation(_))
        ));
        assert!(matches!(
            validate_registration("alice", ""),
            Err(AuthError::Validation(_))
        ));
    }

    #[test]
    fn test_name_length_limit() {
        let longest = "é".repeat(MAX_NAME_LEN);
        assert!(validate_registration(&longest, "pw1").is_ok());
        assert!(validate_registration(&format!("  {longest}  "), "pw1").is_ok());

        let err = validate_registration(&"a".repeat(MAX_NAME_LEN + 1), "pw1").unwrap_err();
        assert_eq!(err.to_string(), "Name must be at most 100 characters");
    }

    #[test]
    fn test_app_error_mapping() {
        assert_eq!(
            AppError::from(AuthError::DuplicateName("alice".into())).status_code(),
            409
        );
        assert_eq!(
            AppError::from(AuthError::InvalidCredentials).status_code(),
            401
        );
        assert_eq!(
            AppError::from(AuthError::NotAuthenticated).status_code(),
            401
        );
        assert_eq!(
            AppError::from(AuthError::Database("x".into())).status_code(),
            500
        );
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            AuthError::DuplicateName("alice".into()).to_string(),
            "Name 'alice' is already taken"
        );
        assert_eq!(
            AuthError::InvalidCredentials.to_string(),
            "Invalid name or password"
        );
        assert_eq!(AuthError::InvalidCredentials.error_code(), "INVALID_CREDENTIALS");
    }
}

//! Form payloads for the authentication pages.

use serde::Deserialize;

/// Register form payload.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterForm {
    /// Desired account name.
    pub name: String,
    /// Plaintext password.
    pub password: String,
}

/// Login form payload.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginForm {
    /// Account name.
    pub name: String,
    /// Plaintext password.
    pub password: String,
}

impl RegisterForm {
    /// Returns the name with surrounding whitespace removed.
    #[must_use]
    pub fn trimmed_name(&self) -> &str {
        self.name.trim()
    }
}

impl LoginForm {
    /// Returns the name with surrounding whitespace removed.
    #[must_use]
    pub fn trimmed_name(&self) -> &str {
        self.name.trim()
    }
}

//! Login Value Object
//!
//! The account's unique sign-in name.
//!
//! Normalization: NFKC, then trim. Comparison is exact (case-sensitive) so
//! two accounts may differ only by case, matching what the storage UNIQUE
//! constraint enforces.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

pub const LOGIN_MAX_LENGTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginError {
    #[error("Login cannot be empty")]
    Empty,

    #[error("Login is too long ({length} chars, maximum {max})")]
    TooLong { length: usize, max: usize },

    #[error("Login cannot contain whitespace or control characters")]
    InvalidCharacter,
}

/// Validated, normalized login
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Login(String);

impl Login {
    pub fn new(input: impl AsRef<str>) -> Result<Self, LoginError> {
        let normalized = input.as_ref().nfkc().collect::<String>().trim().to_string();

        if normalized.is_empty() {
            return Err(LoginError::Empty);
        }

        let length = normalized.chars().count();
        if length > LOGIN_MAX_LENGTH {
            return Err(LoginError::TooLong {
                length,
                max: LOGIN_MAX_LENGTH,
            });
        }

        if normalized
            .chars()
            .any(|c| c.is_whitespace() || c.is_control())
        {
            return Err(LoginError::InvalidCharacter);
        }

        Ok(Self(normalized))
    }

    /// Create from database value (assumes already validated)
    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Login {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Login {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Login({:?})", self.0)
    }
}

impl TryFrom<String> for Login {
    type Error = LoginError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Login> for String {
    fn from(login: Login) -> Self {
        login.0
    }
}

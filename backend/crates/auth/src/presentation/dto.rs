//! API DTOs (Data Transfer Objects)
//!
//! Missing request fields default to empty so they surface as
//! "Missing required fields" instead of a JSON decoding error.

use serde::{Deserialize, Serialize};

// ============================================================================
// Register
// ============================================================================

/// Register request
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegisterRequest {
    pub login: String,
    pub password: String,
    pub name: String,
    pub age: i32,
}

// ============================================================================
// Authenticate
// ============================================================================

/// Authenticate request
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct AuthRequest {
    pub login: String,
    pub password: String,
}

impl std::fmt::Debug for AuthRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthRequest")
            .field("login", &self.login)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Login change
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ChangeLoginRequest {
    pub login: String,
}

// ============================================================================
// Common
// ============================================================================

/// `{"message": "..."}` acknowledgement
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

impl MessageResponse {
    pub const fn new(message: &'static str) -> Self {
        Self { message }
    }
}

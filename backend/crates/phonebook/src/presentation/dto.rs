//! API DTOs (Data Transfer Objects)
//!
//! Request fields default to empty so missing ones are reported as
//! "Missing required fields". Unknown fields (a client-sent `user_id`
//! included) are ignored.

use serde::{Deserialize, Serialize};

/// Add phone request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AddPhoneRequest {
    pub phone_number: String,
    pub description: String,
    pub is_fax: bool,
}

/// Update phone request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdatePhoneRequest {
    pub id: i64,
    pub phone_number: String,
    pub description: String,
    pub is_fax: bool,
}

/// Search query string (`?q=`)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    pub q: String,
}

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

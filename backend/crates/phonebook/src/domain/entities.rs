//! Domain Entities

use kernel::id::{AccountId, PhoneId};
use serde::Serialize;

use crate::error::{PhoneError, PhoneResult};

pub const PHONE_NUMBER_MAX_LENGTH: usize = 32;
pub const DESCRIPTION_MAX_LENGTH: usize = 256;

/// Phone record, owned by exactly one account
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Phone {
    pub id: PhoneId,
    /// Owner
    pub user_id: AccountId,
    pub phone_number: String,
    pub description: String,
    pub is_fax: bool,
}

/// Phone awaiting insertion; the owner is always the authenticated caller
#[derive(Debug, Clone)]
pub struct NewPhone {
    pub user_id: AccountId,
    pub phone_number: String,
    pub description: String,
    pub is_fax: bool,
}

/// Replacement values for an existing record
#[derive(Debug, Clone)]
pub struct PhoneUpdate {
    pub id: PhoneId,
    pub phone_number: String,
    pub description: String,
    pub is_fax: bool,
}

/// Trim and check the user-editable fields
pub fn validate_fields(phone_number: &str, description: &str) -> PhoneResult<(String, String)> {
    let phone_number = phone_number.trim();
    let description = description.trim();

    if phone_number.is_empty() || description.is_empty() {
        return Err(PhoneError::Validation("Missing required fields".to_string()));
    }
    if phone_number.chars().count() > PHONE_NUMBER_MAX_LENGTH {
        return Err(PhoneError::Validation(format!(
            "Phone number must be at most {PHONE_NUMBER_MAX_LENGTH} characters"
        )));
    }
    if description.chars().count() > DESCRIPTION_MAX_LENGTH {
        return Err(PhoneError::Validation(format!(
            "Description must be at most {DESCRIPTION_MAX_LENGTH} characters"
        )));
    }

    Ok((phone_number.to_string(), description.to_string()))
}

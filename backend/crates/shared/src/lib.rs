//! Shared Kernel - Domain-crossing minimal core
//!
//! Vocabulary shared by the `auth` and `phonebook` crates:
//! - Unified error type ([`error::app_error::AppError`]) and its HTTP mapping
//! - Typed integer identifiers for accounts and phone records
//!
//! **Design Principle**: only things whose meaning is identical in every
//! domain crate belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;

//! Phonebook Backend Module
//!
//! Phone records owned by accounts.
//!
//! Clean Architecture structure:
//! - `domain/` - Entities and repository trait
//! - `application/` - Use cases and the ownership guard
//! - `infra/` - Postgres and in-memory implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Security Model
//! - The owner of a new record is always the authenticated caller
//! - Update and delete check ownership first, then write with the owner
//!   in the statement's own predicate
//! - Listing is scoped to the caller in the query itself
//! - Phone numbers are unique system-wide (storage constraint)

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use error::{PhoneError, PhoneResult};
pub use infra::{memory::MemoryPhoneRepository, postgres::PgPhoneRepository};
pub use presentation::{PhoneAppState, phonebook_router};

pub mod models {
    pub use crate::domain::entities::*;
    pub use crate::presentation::dto::*;
}

pub mod store {
    pub use crate::domain::repository::PhoneRepository;
    pub use crate::infra::memory::MemoryPhoneRepository as MemoryPhoneStore;
    pub use crate::infra::postgres::PgPhoneRepository as PhoneStore;
}

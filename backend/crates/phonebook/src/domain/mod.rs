//! Domain Layer
//!
//! This layer contains:
//! - Domain entities (Phone, NewPhone, PhoneUpdate)
//! - Repository traits (interfaces)

pub mod entities;
pub mod repository;

pub use entities::{NewPhone, Phone, PhoneUpdate};
pub use repository::PhoneRepository;

//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database and in-memory implementations
//! - `presentation/` - HTTP handlers, DTOs, router, middleware
//!
//! ## Features
//! - Registration with login + password (+ display name and age)
//! - Sign in returning a signed, stateless session token in a cookie
//! - Per-request session verification with stale-login detection
//! - Public profile lookup and login change
//!
//! ## Security Model
//! - Passwords hashed with Argon2id; unknown logins still pay the hashing cost
//! - Tokens are HMAC-SHA256 signed and carry an expiry
//! - A token authorizes only while its `(login, user_id)` pair still matches
//!   a live account

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult, SessionRejection};
pub use infra::{memory::MemoryAuthRepository, postgres::PgAuthRepository};
pub use presentation::router::{protected_router, public_router};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::AppError,
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod store {
    pub use crate::domain::repository::AccountRepository;
    pub use crate::infra::memory::MemoryAuthRepository as MemoryAuthStore;
    pub use crate::infra::postgres::PgAuthRepository as AuthStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}

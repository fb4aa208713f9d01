//! Value Objects

pub mod login;

pub use login::{Login, LoginError};

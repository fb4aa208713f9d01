//! Entities

pub mod account;

pub use account::{Account, AccountProfile, NewAccount, SessionClaims};

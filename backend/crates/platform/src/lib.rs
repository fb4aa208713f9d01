//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (HMAC-SHA256, Base64url, secure randomness)
//! - Password hashing (Argon2id) and registration password policy
//! - Signed, stateless session tokens (compact HS256 format)
//! - Cookie management

pub mod cookie;
pub mod crypto;
pub mod password;
pub mod token;

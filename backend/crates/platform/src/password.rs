//! Password Hashing and Verification
//!
//! Argon2id hashing with:
//! - A random salt per hash (same password, different PHC strings)
//! - Configurable cost, so tests and small deployments can trade strength
//!   for latency without changing the stored format
//! - Optional pepper passed to Argon2 as its secret input
//! - Zeroization of clear text passwords
//!
//! Verification never fails loudly: a wrong password and an unreadable
//! stored hash both simply return `false`.

use std::fmt;
use std::sync::OnceLock;

use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version,
    password_hash::SaltString,
};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Maximum password length in characters
pub const MAX_PASSWORD_LENGTH: usize = 128;

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violation errors (registration only)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("Password must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    #[error("Password cannot be empty or contain only whitespace")]
    EmptyOrWhitespace,

    #[error("Password contains invalid control characters")]
    InvalidCharacter,

    #[error("Password is too common or follows a predictable pattern")]
    CommonPattern,
}

/// Password hashing errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    /// Argon2 failed to produce a hash (resource exhaustion, bad pepper length)
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// Configured cost is outside what Argon2 accepts
    #[error("Invalid hashing parameters: {0}")]
    InvalidCost(String),
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// The input is NFKC-normalized on construction so that visually identical
/// passwords typed on different keyboards hash the same way. No policy is
/// applied here; see [`PasswordPolicy`].
///
/// - Does not implement `Clone`
/// - Debug output is redacted
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    pub fn new(mut raw: String) -> Self {
        let normalized: String = raw.nfkc().collect();
        raw.zeroize();
        Self(normalized)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Password Policy
// ============================================================================

/// Rules applied to new passwords at registration
///
/// The default only rejects empty, overlong and control-character passwords.
/// [`PasswordPolicy::strict`] adds the NIST SP 800-63B minimum length and a
/// weak-pattern check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordPolicy {
    /// Minimum length in Unicode code points
    pub min_length: usize,
    /// Reject sequential digits, keyboard walks and very common passwords
    pub reject_common_patterns: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 1,
            reject_common_patterns: false,
        }
    }
}

impl PasswordPolicy {
    pub fn strict() -> Self {
        Self {
            min_length: 8,
            reject_common_patterns: true,
        }
    }

    pub fn check(&self, password: &ClearTextPassword) -> Result<(), PasswordPolicyError> {
        let value = password.0.as_str();

        if value.trim().is_empty() {
            return Err(PasswordPolicyError::EmptyOrWhitespace);
        }

        let char_count = value.chars().count();
        if char_count < self.min_length {
            return Err(PasswordPolicyError::TooShort {
                min: self.min_length,
                actual: char_count,
            });
        }
        if char_count > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        // Space, tab and newline are allowed
        if value
            .chars()
            .any(|ch| ch.is_control() && ch != '\t' && ch != '\n')
        {
            return Err(PasswordPolicyError::InvalidCharacter);
        }

        if self.reject_common_patterns && is_common_pattern(value) {
            return Err(PasswordPolicyError::CommonPattern);
        }

        Ok(())
    }
}

// ============================================================================
// Hashing cost
// ============================================================================

/// Argon2id cost parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashCost {
    /// Memory in KiB
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for HashCost {
    /// OWASP recommendation: m=19456 (19 MiB), t=2, p=1
    fn default() -> Self {
        Self {
            memory_kib: 19_456,
            iterations: 2,
            parallelism: 1,
        }
    }
}

impl HashCost {
    /// Smallest cost Argon2 accepts. Only for tests.
    pub const fn testing() -> Self {
        Self {
            memory_kib: 8,
            iterations: 1,
            parallelism: 1,
        }
    }

    fn params(&self) -> Result<Params, PasswordHashError> {
        Params::new(self.memory_kib, self.iterations, self.parallelism, None)
            .map_err(|e| PasswordHashError::InvalidCost(e.to_string()))
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// Stored password hash in PHC string format
///
/// Constructed from storage without validation: a corrupt value must make
/// verification fail, not make the account row unreadable.
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword(String);

impl HashedPassword {
    pub fn from_db(phc: impl Into<String>) -> Self {
        Self(phc.into())
    }

    pub fn as_phc_string(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("HashedPassword").field(&"[HASH]").finish()
    }
}

// ============================================================================
// Credential Hasher
// ============================================================================

/// One-way password hashing and verification
#[derive(Clone)]
pub struct CredentialHasher {
    cost: HashCost,
    pepper: Option<Vec<u8>>,
    dummy: OnceLock<Option<HashedPassword>>,
}

impl CredentialHasher {
    pub fn new(cost: HashCost, pepper: Option<Vec<u8>>) -> Self {
        Self {
            cost,
            pepper,
            dummy: OnceLock::new(),
        }
    }

    pub fn cost(&self) -> HashCost {
        self.cost
    }

    fn argon2(&self, params: Params) -> Result<Argon2<'_>, PasswordHashError> {
        match self.pepper.as_deref() {
            Some(secret) => Argon2::new_with_secret(secret, Algorithm::Argon2id, Version::V0x13, params)
                .map_err(|e| PasswordHashError::HashingFailed(e.to_string())),
            None => Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params)),
        }
    }

    /// Hash a password with a fresh random salt
    pub fn hash(&self, password: &ClearTextPassword) -> Result<HashedPassword, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = self.argon2(self.cost.params()?)?;

        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(HashedPassword(hash.to_string()))
    }

    /// Verify a password against a stored hash
    ///
    /// The parameters recorded in the PHC string are used, so hashes created
    /// under an older cost still verify. Argon2 compares in constant time.
    pub fn verify(&self, stored: &HashedPassword, password: &ClearTextPassword) -> bool {
        let Ok(parsed) = PasswordHash::new(stored.as_phc_string()) else {
            return false;
        };

        let Ok(argon2) = self.argon2(Params::default()) else {
            return false;
        };

        argon2.verify_password(password.as_bytes(), &parsed).is_ok()
    }

    /// Burn the same work as a real verification against an unknown account
    pub fn verify_dummy(&self, password: &ClearTextPassword) {
        let dummy = self.dummy.get_or_init(|| {
            self.hash(&ClearTextPassword::new("dummy-password-for-timing".to_string()))
                .ok()
        });

        if let Some(dummy) = dummy {
            let _ = self.verify(dummy, password);
        }
    }

    /// True when the stored hash is not Argon2id or was made with a
    /// different cost than the one configured now
    pub fn needs_rehash(&self, stored: &HashedPassword) -> bool {
        let Ok(parsed) = PasswordHash::new(stored.as_phc_string()) else {
            return true;
        };

        if parsed.algorithm != Algorithm::Argon2id.ident() {
            return true;
        }

        match Params::try_from(&parsed) {
            Ok(params) => {
                params.m_cost() != self.cost.memory_kib
                    || params.t_cost() != self.cost.iterations
                    || params.p_cost() != self.cost.parallelism
            }
            Err(_) => true,
        }
    }
}

impl Default for CredentialHasher {
    fn default() -> Self {
        Self::new(HashCost::default(), None)
    }
}

impl fmt::Debug for CredentialHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialHasher")
            .field("cost", &self.cost)
            .field("pepper", &self.pepper.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn is_common_pattern(password: &str) -> bool {
    let lower = password.to_lowercase();

    // Single repeated character ("aaaaaaaa")
    let mut chars = lower.chars();
    if let Some(first) = chars.next() {
        if lower.chars().count() >= 3 && chars.all(|c| c == first) {
            return true;
        }
    }

    if is_sequential_numbers(&lower) {
        return true;
    }

    const KEYBOARD_PATTERNS: &[&str] = &[
        "qwerty", "asdfgh", "zxcvbn", "qazwsx", "1qaz2wsx",
    ];
    if KEYBOARD_PATTERNS.iter().any(|p| lower.contains(p)) {
        return true;
    }

    const COMMON_PASSWORDS: &[&str] = &[
        "password",
        "password1",
        "password123",
        "abcdefgh",
        "letmein",
        "welcome",
        "admin123",
        "iloveyou",
        "sunshine",
        "princess",
        "football",
        "monkey",
        "dragon",
        "trustno1",
    ];
    COMMON_PASSWORDS.contains(&lower.as_str())
}

/// All digits, at least four, counting straight up or down ("1234", "9876")
fn is_sequential_numbers(s: &str) -> bool {
    if !s.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    let digits: Vec<u32> = s.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.len() < 4 {
        return false;
    }

    let ascending = digits.windows(2).all(|w| w[1] == (w[0] + 1) % 10);
    let descending = digits.windows(2).all(|w| w[0] == (w[1] + 1) % 10);

    ascending || descending
}

//! Signed Session Tokens
//!
//! Compact HS256 tokens in the familiar three-part layout:
//!
//! ```text
//! base64url(header) "." base64url(claims) "." base64url(HMAC-SHA256(header "." claims))
//! ```
//!
//! The signature is checked before anything else is parsed, so a token
//! whose bytes were altered anywhere is reported as [`TokenError::BadSignature`]
//! rather than as a parse failure.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::crypto;

/// Minimum key length in bytes (HMAC-SHA256 block strength)
pub const MIN_KEY_LEN: usize = 32;

const ALGORITHM: &str = "HS256";

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SigningKeyError {
    #[error("Signing key must be at least {min} bytes (got {actual})")]
    TooShort { min: usize, actual: usize },

    #[error("Signing key is not valid base64")]
    InvalidEncoding,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Not three dot-separated parts, or the signed content is not a token
    #[error("Malformed token")]
    Malformed,

    /// Signature missing, undecodable or not produced by this key
    #[error("Invalid token signature")]
    BadSignature,

    #[error("Token expired")]
    Expired,

    /// Claims could not be serialized
    #[error("Token encoding failed: {0}")]
    Encoding(String),
}

// ============================================================================
// Signing Key
// ============================================================================

/// Server-side HMAC key
///
/// Held for the lifetime of the process. Debug output is redacted and the
/// bytes are wiped on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SigningKey(Vec<u8>);

impl SigningKey {
    pub fn new(bytes: Vec<u8>) -> Result<Self, SigningKeyError> {
        if bytes.len() < MIN_KEY_LEN {
            return Err(SigningKeyError::TooShort {
                min: MIN_KEY_LEN,
                actual: bytes.len(),
            });
        }
        Ok(Self(bytes))
    }

    /// Fresh random key. Tokens signed with it do not survive a restart.
    pub fn generate() -> Self {
        Self(crypto::random_bytes(MIN_KEY_LEN))
    }

    /// Key from standard base64 (the form used in environment variables)
    pub fn from_base64(encoded: &str) -> Result<Self, SigningKeyError> {
        let bytes =
            crypto::from_base64(encoded.trim()).map_err(|_| SigningKeyError::InvalidEncoding)?;
        Self::new(bytes)
    }

    fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SigningKey").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// Wire format
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
struct Header {
    alg: String,
    typ: String,
}

impl Header {
    fn hs256() -> Self {
        Self {
            alg: ALGORITHM.to_string(),
            typ: "JWT".to_string(),
        }
    }
}

/// Caller claims plus the registered time claims
#[derive(Debug, Serialize, Deserialize)]
struct Envelope<C> {
    #[serde(flatten)]
    claims: C,
    iat: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    exp: Option<i64>,
}

// ============================================================================
// Codec
// ============================================================================

/// Issues and verifies tokens carrying claims of type `C`
#[derive(Debug, Clone)]
pub struct TokenCodec {
    key: SigningKey,
    ttl: Option<Duration>,
}

impl TokenCodec {
    /// Codec whose tokens never expire
    pub fn new(key: SigningKey) -> Self {
        Self { key, ttl: None }
    }

    /// Set the lifetime stamped into new tokens as `exp`
    pub fn with_ttl(mut self, ttl: Option<Duration>) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn ttl(&self) -> Option<Duration> {
        self.ttl
    }

    pub fn encode<C: Serialize>(&self, claims: &C) -> Result<String, TokenError> {
        self.encode_at(claims, Utc::now())
    }

    pub fn encode_at<C: Serialize>(
        &self,
        claims: &C,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let exp = match self.ttl {
            Some(ttl) => {
                let ttl = chrono::Duration::from_std(ttl)
                    .map_err(|e| TokenError::Encoding(e.to_string()))?;
                let exp = now
                    .checked_add_signed(ttl)
                    .ok_or_else(|| TokenError::Encoding("expiry out of range".to_string()))?;
                Some(exp.timestamp())
            }
            None => None,
        };

        let envelope = Envelope {
            claims,
            iat: now.timestamp(),
            exp,
        };

        let header = serde_json::to_vec(&Header::hs256())
            .map_err(|e| TokenError::Encoding(e.to_string()))?;
        let payload =
            serde_json::to_vec(&envelope).map_err(|e| TokenError::Encoding(e.to_string()))?;

        let signing_input = format!(
            "{}.{}",
            crypto::to_base64url(&header),
            crypto::to_base64url(&payload)
        );
        let signature = crypto::hmac_sha256(self.key.as_bytes(), signing_input.as_bytes());

        Ok(format!(
            "{}.{}",
            signing_input,
            crypto::to_base64url(&signature)
        ))
    }

    pub fn decode<C: DeserializeOwned>(&self, token: &str) -> Result<C, TokenError> {
        self.decode_at(token, Utc::now())
    }

    pub fn decode_at<C: DeserializeOwned>(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<C, TokenError> {
        let (signing_input, signature) = token.rsplit_once('.').ok_or(TokenError::Malformed)?;

        let signature =
            crypto::from_base64url(signature).map_err(|_| TokenError::BadSignature)?;
        if !crypto::verify_hmac_sha256(self.key.as_bytes(), signing_input.as_bytes(), &signature)
        {
            return Err(TokenError::BadSignature);
        }

        let (header, payload) = signing_input
            .split_once('.')
            .ok_or(TokenError::Malformed)?;

        let header: Header = crypto::from_base64url(header)
            .ok()
            .and_then(|bytes| serde_json::from_slice(&bytes).ok())
            .ok_or(TokenError::Malformed)?;
        if header.alg != ALGORITHM {
            return Err(TokenError::Malformed);
        }

        let envelope: Envelope<C> = crypto::from_base64url(payload)
            .ok()
            .and_then(|bytes| serde_json::from_slice(&bytes).ok())
            .ok_or(TokenError::Malformed)?;

        if let Some(exp) = envelope.exp {
            if now.timestamp() >= exp {
                return Err(TokenError::Expired);
            }
        }

        Ok(envelope.claims)
    }
}

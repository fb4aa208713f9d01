//! Common ID Types
//!
//! Type-safe wrappers around the integer primary keys issued by storage.

use std::fmt;
use std::marker::PhantomData;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Generic typed ID wrapper over a storage-assigned `i64`
///
/// Usage:
/// ```
/// use kernel::id::{Id, markers};
/// type AccountId = Id<markers::Account>;
/// let id = AccountId::new(7).unwrap();
/// assert_eq!(id.get(), 7);
/// ```
pub struct Id<T> {
    value: i64,
    _marker: PhantomData<fn() -> T>,
}

/// Raised when an identifier is zero or negative
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("identifier must be a positive integer (got {0})")]
pub struct InvalidId(pub i64);

impl<T> Id<T> {
    /// Validate a client-supplied identifier
    pub fn new(value: i64) -> Result<Self, InvalidId> {
        if value > 0 {
            Ok(Self::from_db(value))
        } else {
            Err(InvalidId(value))
        }
    }

    /// Wrap a key read back from storage
    pub const fn from_db(value: i64) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    pub const fn get(&self) -> i64 {
        self.value
    }
}

// Manual impls: derives would put bounds on the marker type.
impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> std::hash::Hash for Id<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> PartialOrd for Id<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Id<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.value.cmp(&other.value)
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.value)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = i64::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}

/// Marker types for different entity IDs
pub mod markers {
    /// Marker for account IDs
    pub struct Account;

    /// Marker for phone record IDs
    pub struct Phone;
}

pub type AccountId = Id<markers::Account>;
pub type PhoneId = Id<markers::Phone>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_positive() {
        assert_eq!(AccountId::new(0), Err(InvalidId(0)));
        assert_eq!(PhoneId::new(-3), Err(InvalidId(-3)));
        assert_eq!(AccountId::new(12).unwrap().get(), 12);
    }

    #[test]
    fn test_serde_is_a_bare_integer() {
        let id = PhoneId::from_db(42);
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");

        let back: PhoneId = serde_json::from_str("42").unwrap();
        assert_eq!(back, id);

        assert!(serde_json::from_str::<PhoneId>("0").is_err());
    }
}

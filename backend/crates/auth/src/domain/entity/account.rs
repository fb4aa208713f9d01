//! Account Entity
//!
//! A registered user. The password hash lives on the entity but is never
//! part of any outward-facing shape; clients only ever see [`AccountProfile`].

use kernel::id::AccountId;
use platform::password::HashedPassword;
use serde::{Deserialize, Serialize};

use crate::domain::value_object::Login;

/// Account entity
#[derive(Debug, Clone)]
pub struct Account {
    /// Storage-assigned identifier
    pub account_id: AccountId,
    /// Unique sign-in name
    pub login: Login,
    /// Argon2id PHC string
    pub password_hash: HashedPassword,
    /// Display name (not unique)
    pub name: String,
    pub age: i32,
}

impl Account {
    pub fn profile(&self) -> AccountProfile {
        AccountProfile {
            id: self.account_id,
            name: self.name.clone(),
            age: self.age,
        }
    }

    /// Whether a session issued for `(login, user_id)` still describes this account
    pub fn matches_session(&self, claims: &SessionClaims) -> bool {
        self.account_id.get() == claims.user_id && self.login.as_str() == claims.login
    }
}

/// Account awaiting insertion; storage assigns the id
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub login: Login,
    pub password_hash: HashedPassword,
    pub name: String,
    pub age: i32,
}

/// Public projection of an account
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountProfile {
    pub id: AccountId,
    pub name: String,
    pub age: i32,
}

/// Identity asserted by a session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub login: String,
    pub user_id: i64,
}

impl SessionClaims {
    pub fn for_account(account: &Account) -> Self {
        Self {
            login: account.login.as_str().to_string(),
            user_id: account.account_id.get(),
        }
    }
}

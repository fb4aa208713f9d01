//! In-Memory Repository
//!
//! Process-local account store for development without a database and for
//! tests. Each operation holds the lock for its whole check-and-write, which
//! gives the same atomicity the UNIQUE constraint gives in Postgres.

use std::collections::BTreeMap;
use std::sync::Arc;

use kernel::id::AccountId;
use platform::password::HashedPassword;
use tokio::sync::RwLock;

use crate::domain::entity::{Account, AccountProfile, NewAccount};
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::Login;
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
struct Accounts {
    next_id: i64,
    by_id: BTreeMap<AccountId, Account>,
}

/// In-memory auth repository
#[derive(Clone, Default)]
pub struct MemoryAuthRepository {
    inner: Arc<RwLock<Accounts>>,
}

impl MemoryAuthRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.by_id.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl AccountRepository for MemoryAuthRepository {
    async fn find_by_login(&self, login: &Login) -> AuthResult<Option<Account>> {
        let accounts = self.inner.read().await;
        Ok(accounts
            .by_id
            .values()
            .find(|a| a.login == *login)
            .cloned())
    }

    async fn find_by_id(&self, account_id: AccountId) -> AuthResult<Option<Account>> {
        Ok(self.inner.read().await.by_id.get(&account_id).cloned())
    }

    async fn insert(&self, account: &NewAccount) -> AuthResult<Account> {
        let mut accounts = self.inner.write().await;

        if accounts.by_id.values().any(|a| a.login == account.login) {
            return Err(AuthError::LoginTaken);
        }

        accounts.next_id += 1;
        let account = Account {
            account_id: AccountId::from_db(accounts.next_id),
            login: account.login.clone(),
            password_hash: account.password_hash.clone(),
            name: account.name.clone(),
            age: account.age,
        };
        accounts.by_id.insert(account.account_id, account.clone());

        Ok(account)
    }

    async fn find_profile_by_name(&self, name: &str) -> AuthResult<Option<AccountProfile>> {
        let accounts = self.inner.read().await;
        Ok(accounts
            .by_id
            .values()
            .find(|a| a.name == name)
            .map(Account::profile))
    }

    async fn update_login(&self, account_id: AccountId, login: &Login) -> AuthResult<bool> {
        let mut accounts = self.inner.write().await;

        if accounts
            .by_id
            .values()
            .any(|a| a.login == *login && a.account_id != account_id)
        {
            return Err(AuthError::LoginTaken);
        }

        match accounts.by_id.get_mut(&account_id) {
            Some(account) => {
                account.login = login.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn update_password(
        &self,
        account_id: AccountId,
        password_hash: &HashedPassword,
    ) -> AuthResult<bool> {
        let mut accounts = self.inner.write().await;

        match accounts.by_id.get_mut(&account_id) {
            Some(account) => {
                account.password_hash = password_hash.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

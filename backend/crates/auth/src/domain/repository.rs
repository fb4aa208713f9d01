//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::AccountId;
use platform::password::HashedPassword;

use crate::domain::entity::{Account, AccountProfile, NewAccount};
use crate::domain::value_object::Login;
use crate::error::AuthResult;

/// Account repository trait
#[trait_variant::make(AccountRepository: Send)]
pub trait LocalAccountRepository {
    /// Find account by exact login
    async fn find_by_login(&self, login: &Login) -> AuthResult<Option<Account>>;

    /// Find account by ID
    async fn find_by_id(&self, account_id: AccountId) -> AuthResult<Option<Account>>;

    /// Insert a new account
    ///
    /// Fails with `AuthError::LoginTaken` when the login already exists.
    /// This is the only uniqueness check; callers must not pre-check.
    async fn insert(&self, account: &NewAccount) -> AuthResult<Account>;

    /// Public projection of the first account with this display name
    async fn find_profile_by_name(&self, name: &str) -> AuthResult<Option<AccountProfile>>;

    /// Rename an account's login
    ///
    /// Returns `false` when the account does not exist,
    /// `AuthError::LoginTaken` when the new login belongs to someone else.
    async fn update_login(&self, account_id: AccountId, login: &Login) -> AuthResult<bool>;

    /// Replace an account's stored password hash; `false` if it does not exist
    async fn update_password(
        &self,
        account_id: AccountId,
        password_hash: &HashedPassword,
    ) -> AuthResult<bool>;
}

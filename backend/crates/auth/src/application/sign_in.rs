//! Sign In Use Case
//!
//! Verifies a login/password pair and mints a session token.

use std::sync::Arc;

use kernel::id::AccountId;
use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::domain::entity::{Account, SessionClaims};
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::Login;
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    pub login: String,
    pub password: String,
}

/// Sign in output
#[derive(Debug)]
pub struct SignInOutput {
    /// Signed session token for the cookie
    pub session_token: String,
    pub account_id: AccountId,
}

/// Credential check and token issuance
pub struct SessionAuthenticator<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> SessionAuthenticator<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    /// Unknown login and wrong password fail identically, including the
    /// time spent hashing.
    pub async fn authenticate(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        if input.login.trim().is_empty() || input.password.is_empty() {
            return Err(AuthError::Validation("Missing required fields".to_string()));
        }

        let password = ClearTextPassword::new(input.password);
        let hasher = self.config.hasher();

        let account = match Login::new(&input.login) {
            Ok(login) => self.repo.find_by_login(&login).await?,
            Err(_) => None,
        };

        let Some(account) = account else {
            hasher.verify_dummy(&password);
            return Err(AuthError::InvalidCredentials);
        };

        if !hasher.verify(&account.password_hash, &password) {
            return Err(AuthError::InvalidCredentials);
        }

        if hasher.needs_rehash(&account.password_hash) {
            self.upgrade_hash(&account, &password).await;
        }

        let session_token = self
            .config
            .tokens()
            .encode(&SessionClaims::for_account(&account))
            .map_err(AuthError::Token)?;

        tracing::info!(account_id = %account.account_id, "User signed in");

        Ok(SignInOutput {
            session_token,
            account_id: account.account_id,
        })
    }

    /// Re-hash with the current cost. A failure only skips the upgrade.
    async fn upgrade_hash(&self, account: &Account, password: &ClearTextPassword) {
        let result = match self.config.hasher().hash(password) {
            Ok(hash) => self.repo.update_password(account.account_id, &hash).await,
            Err(e) => Err(e.into()),
        };

        match result {
            Ok(_) => {
                tracing::info!(account_id = %account.account_id, "Password hash upgraded");
            }
            Err(e) => {
                tracing::warn!(
                    account_id = %account.account_id,
                    error = %e,
                    "Password hash upgrade failed"
                );
            }
        }
    }
}

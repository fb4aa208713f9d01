//! Change Login Use Case
//!
//! Renames the caller's login. Every token issued for the old login stops
//! authorizing, so a fresh one is minted for the new login.

use std::sync::Arc;

use kernel::id::AccountId;

use crate::application::config::AuthConfig;
use crate::domain::entity::SessionClaims;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::Login;
use crate::error::{AuthError, AuthResult, SessionRejection};

pub struct ChangeLoginUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> ChangeLoginUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    /// Returns the replacement session token
    pub async fn execute(&self, account_id: AccountId, new_login: &str) -> AuthResult<String> {
        let login = Login::new(new_login).map_err(|e| AuthError::Validation(e.to_string()))?;

        if !self.repo.update_login(account_id, &login).await? {
            // Deleted between authorization and now
            return Err(AuthError::Unauthenticated(SessionRejection::UnknownAccount));
        }

        let claims = SessionClaims {
            login: login.as_str().to_string(),
            user_id: account_id.get(),
        };
        let token = self
            .config
            .tokens()
            .encode(&claims)
            .map_err(AuthError::Token)?;

        tracing::info!(account_id = %account_id, "Login changed");

        Ok(token)
    }
}

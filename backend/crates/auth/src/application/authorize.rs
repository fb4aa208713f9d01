//! Request Authorization
//!
//! Turns the session token presented with a request into the caller's
//! account id, or rejects it.

use std::sync::Arc;

use kernel::id::AccountId;

use crate::application::config::AuthConfig;
use crate::domain::entity::SessionClaims;
use crate::domain::repository::AccountRepository;
use crate::error::{AuthError, AuthResult, SessionRejection};

/// Per-request session gate
pub struct RequestAuthorizer<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> RequestAuthorizer<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    /// Resolve the caller
    ///
    /// A valid signature is not enough: the account must still exist and
    /// still carry the login the token was issued for.
    pub async fn authorize(&self, token: Option<&str>) -> AuthResult<AccountId> {
        let token = token.ok_or(AuthError::Unauthenticated(SessionRejection::MissingToken))?;

        let claims: SessionClaims = self
            .config
            .tokens()
            .decode(token)
            .map_err(|e| AuthError::Unauthenticated(e.into()))?;

        let account_id = AccountId::new(claims.user_id)
            .map_err(|_| AuthError::Unauthenticated(SessionRejection::Malformed))?;

        let account = self
            .repo
            .find_by_id(account_id)
            .await?
            .ok_or(AuthError::Unauthenticated(SessionRejection::UnknownAccount))?;

        if !account.matches_session(&claims) {
            return Err(AuthError::Unauthenticated(SessionRejection::StaleLogin));
        }

        Ok(account.account_id)
    }
}

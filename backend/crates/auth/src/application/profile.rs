//! Profile Lookup Use Case

use std::sync::Arc;

use crate::domain::entity::AccountProfile;
use crate::domain::repository::AccountRepository;
use crate::error::{AuthError, AuthResult};

pub struct GetProfileUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
}

impl<R> GetProfileUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, name: &str) -> AuthResult<AccountProfile> {
        self.repo
            .find_profile_by_name(name)
            .await?
            .ok_or(AuthError::NotFound)
    }
}

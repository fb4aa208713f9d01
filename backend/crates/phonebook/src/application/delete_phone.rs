//! Delete Phone Use Case

use std::sync::Arc;

use kernel::id::{AccountId, PhoneId};

use crate::application::ownership::OwnershipGuard;
use crate::domain::repository::PhoneRepository;
use crate::error::{PhoneError, PhoneResult};

pub struct DeletePhoneUseCase<R>
where
    R: PhoneRepository,
{
    repo: Arc<R>,
    guard: OwnershipGuard<R>,
}

impl<R> DeletePhoneUseCase<R>
where
    R: PhoneRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self {
            guard: OwnershipGuard::new(repo.clone()),
            repo,
        }
    }

    pub async fn execute(&self, caller: AccountId, phone_id: PhoneId) -> PhoneResult<()> {
        self.guard.ensure_owner(phone_id, caller).await?;

        if !self.repo.delete_owned(caller, phone_id).await? {
            self.guard.ensure_owner(phone_id, caller).await?;
            return Err(PhoneError::NotFound);
        }

        tracing::info!(phone_id = %phone_id, account_id = %caller, "Phone deleted");

        Ok(())
    }
}

//! Ownership Guard
//!
//! Decides whether a caller may mutate a phone record.

use std::sync::Arc;

use kernel::id::{AccountId, PhoneId};

use crate::domain::repository::PhoneRepository;
use crate::error::{PhoneError, PhoneResult};

pub struct OwnershipGuard<R>
where
    R: PhoneRepository,
{
    repo: Arc<R>,
}

impl<R> OwnershipGuard<R>
where
    R: PhoneRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// `true` iff the record exists and belongs to `account_id`
    ///
    /// A missing record is `PhoneError::NotFound`, not `false`.
    pub async fn check_owner(&self, phone_id: PhoneId, account_id: AccountId) -> PhoneResult<bool> {
        let owner = self
            .repo
            .find_owner(phone_id)
            .await?
            .ok_or(PhoneError::NotFound)?;

        Ok(owner == account_id)
    }

    pub async fn ensure_owner(&self, phone_id: PhoneId, account_id: AccountId) -> PhoneResult<()> {
        if self.check_owner(phone_id, account_id).await? {
            Ok(())
        } else {
            tracing::warn!(
                phone_id = %phone_id,
                account_id = %account_id,
                "Phone ownership check failed"
            );
            Err(PhoneError::Forbidden)
        }
    }
}

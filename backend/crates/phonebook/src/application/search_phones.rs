//! Search Phones Use Case

use std::sync::Arc;

use kernel::id::AccountId;

use crate::domain::entities::Phone;
use crate::domain::repository::PhoneRepository;
use crate::error::PhoneResult;

pub struct SearchPhonesUseCase<R>
where
    R: PhoneRepository,
{
    repo: Arc<R>,
}

impl<R> SearchPhonesUseCase<R>
where
    R: PhoneRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Caller's records whose number contains `query`; empty query lists all
    pub async fn execute(&self, caller: AccountId, query: &str) -> PhoneResult<Vec<Phone>> {
        self.repo.search(caller, query.trim()).await
    }
}

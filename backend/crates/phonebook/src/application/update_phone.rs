//! Update Phone Use Case

use std::sync::Arc;

use kernel::id::{AccountId, PhoneId};

use crate::application::ownership::OwnershipGuard;
use crate::domain::entities::{PhoneUpdate, validate_fields};
use crate::domain::repository::PhoneRepository;
use crate::error::{PhoneError, PhoneResult};

pub struct UpdatePhoneInput {
    pub id: i64,
    pub phone_number: String,
    pub description: String,
    pub is_fax: bool,
}

pub struct UpdatePhoneUseCase<R>
where
    R: PhoneRepository,
{
    repo: Arc<R>,
    guard: OwnershipGuard<R>,
}

impl<R> UpdatePhoneUseCase<R>
where
    R: PhoneRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self {
            guard: OwnershipGuard::new(repo.clone()),
            repo,
        }
    }

    pub async fn execute(&self, caller: AccountId, input: UpdatePhoneInput) -> PhoneResult<()> {
        if input.id == 0 {
            return Err(PhoneError::Validation("Missing required fields".to_string()));
        }
        let id = PhoneId::new(input.id).map_err(|e| PhoneError::Validation(e.to_string()))?;
        let (phone_number, description) = validate_fields(&input.phone_number, &input.description)?;

        self.guard.ensure_owner(id, caller).await?;

        let update = PhoneUpdate {
            id,
            phone_number,
            description,
            is_fax: input.is_fax,
        };

        if !self.repo.update_owned(caller, &update).await? {
            // Ownership changed or the record vanished after the check
            self.guard.ensure_owner(id, caller).await?;
            return Err(PhoneError::NotFound);
        }

        tracing::info!(phone_id = %id, account_id = %caller, "Phone updated");

        Ok(())
    }
}

//! Add Phone Use Case

use std::sync::Arc;

use kernel::id::AccountId;

use crate::domain::entities::{NewPhone, Phone, validate_fields};
use crate::domain::repository::PhoneRepository;
use crate::error::PhoneResult;

pub struct AddPhoneInput {
    pub phone_number: String,
    pub description: String,
    pub is_fax: bool,
}

pub struct AddPhoneUseCase<R>
where
    R: PhoneRepository,
{
    repo: Arc<R>,
}

impl<R> AddPhoneUseCase<R>
where
    R: PhoneRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// The record is always owned by `caller`
    pub async fn execute(&self, caller: AccountId, input: AddPhoneInput) -> PhoneResult<Phone> {
        let (phone_number, description) = validate_fields(&input.phone_number, &input.description)?;

        // Duplicate numbers are rejected by the insert itself
        let phone = self
            .repo
            .insert(&NewPhone {
                user_id: caller,
                phone_number,
                description,
                is_fax: input.is_fax,
            })
            .await?;

        tracing::info!(phone_id = %phone.id, account_id = %caller, "Phone added");

        Ok(phone)
    }
}

//! Repository Traits

use kernel::id::{AccountId, PhoneId};

use crate::domain::entities::{NewPhone, Phone, PhoneUpdate};
use crate::error::PhoneResult;

/// Phone repository trait
///
/// Every write that targets an existing record carries the owner in its own
/// predicate, so a change of ownership between check and write cannot let
/// the write through.
#[trait_variant::make(PhoneRepository: Send)]
pub trait LocalPhoneRepository {
    /// Owner of a record, `None` if it does not exist
    async fn find_owner(&self, phone_id: PhoneId) -> PhoneResult<Option<AccountId>>;

    /// Insert a record; `PhoneError::DuplicateNumber` if the number is taken
    async fn insert(&self, phone: &NewPhone) -> PhoneResult<Phone>;

    /// Owner's records whose number contains `query` (taken literally)
    async fn search(&self, owner: AccountId, query: &str) -> PhoneResult<Vec<Phone>>;

    /// Update `update.id` if it belongs to `owner`; `false` if no row matched
    async fn update_owned(&self, owner: AccountId, update: &PhoneUpdate) -> PhoneResult<bool>;

    /// Delete `phone_id` if it belongs to `owner`; `false` if no row matched
    async fn delete_owned(&self, owner: AccountId, phone_id: PhoneId) -> PhoneResult<bool>;
}

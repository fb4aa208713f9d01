//! In-Memory Repository
//!
//! Mirrors the Postgres semantics: unique phone numbers, owner-scoped
//! writes, each operation atomic under one lock.

use std::collections::BTreeMap;
use std::sync::Arc;

use kernel::id::{AccountId, PhoneId};
use tokio::sync::RwLock;

use crate::domain::entities::{NewPhone, Phone, PhoneUpdate};
use crate::domain::repository::PhoneRepository;
use crate::error::{PhoneError, PhoneResult};

#[derive(Default)]
struct Phones {
    next_id: i64,
    by_id: BTreeMap<PhoneId, Phone>,
}

impl Phones {
    fn number_taken(&self, number: &str, except: Option<PhoneId>) -> bool {
        self.by_id
            .values()
            .any(|p| p.phone_number == number && Some(p.id) != except)
    }
}

/// In-memory phone repository
#[derive(Clone, Default)]
pub struct MemoryPhoneRepository {
    inner: Arc<RwLock<Phones>>,
}

impl MemoryPhoneRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reassign a record, bypassing every check. Lets tests simulate an
    /// ownership change racing a write.
    pub async fn force_owner(&self, phone_id: PhoneId, owner: AccountId) {
        if let Some(phone) = self.inner.write().await.by_id.get_mut(&phone_id) {
            phone.user_id = owner;
        }
    }
}

impl PhoneRepository for MemoryPhoneRepository {
    async fn find_owner(&self, phone_id: PhoneId) -> PhoneResult<Option<AccountId>> {
        Ok(self
            .inner
            .read()
            .await
            .by_id
            .get(&phone_id)
            .map(|p| p.user_id))
    }

    async fn insert(&self, phone: &NewPhone) -> PhoneResult<Phone> {
        let mut phones = self.inner.write().await;

        if phones.number_taken(&phone.phone_number, None) {
            return Err(PhoneError::DuplicateNumber);
        }

        phones.next_id += 1;
        let phone = Phone {
            id: PhoneId::from_db(phones.next_id),
            user_id: phone.user_id,
            phone_number: phone.phone_number.clone(),
            description: phone.description.clone(),
            is_fax: phone.is_fax,
        };
        phones.by_id.insert(phone.id, phone.clone());

        Ok(phone)
    }

    async fn search(&self, owner: AccountId, query: &str) -> PhoneResult<Vec<Phone>> {
        let phones = self.inner.read().await;
        Ok(phones
            .by_id
            .values()
            .filter(|p| p.user_id == owner && p.phone_number.contains(query))
            .cloned()
            .collect())
    }

    async fn update_owned(&self, owner: AccountId, update: &PhoneUpdate) -> PhoneResult<bool> {
        let mut phones = self.inner.write().await;

        let owned = phones
            .by_id
            .get(&update.id)
            .is_some_and(|p| p.user_id == owner);
        if !owned {
            return Ok(false);
        }

        if phones.number_taken(&update.phone_number, Some(update.id)) {
            return Err(PhoneError::DuplicateNumber);
        }

        if let Some(phone) = phones.by_id.get_mut(&update.id) {
            phone.phone_number = update.phone_number.clone();
            phone.description = update.description.clone();
            phone.is_fax = update.is_fax;
        }

        Ok(true)
    }

    async fn delete_owned(&self, owner: AccountId, phone_id: PhoneId) -> PhoneResult<bool> {
        let mut phones = self.inner.write().await;

        let owned = phones
            .by_id
            .get(&phone_id)
            .is_some_and(|p| p.user_id == owner);
        if owned {
            phones.by_id.remove(&phone_id);
        }

        Ok(owned)
    }
}

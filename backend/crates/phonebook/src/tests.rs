//! Use case tests against the in-memory repository

#[cfg(test)]
mod ownership_tests {
    use std::sync::Arc;

    use kernel::id::{AccountId, PhoneId};

    use crate::application::{
        AddPhoneInput, AddPhoneUseCase, DeletePhoneUseCase, OwnershipGuard, SearchPhonesUseCase,
        UpdatePhoneInput, UpdatePhoneUseCase,
    };
    use crate::error::PhoneError;
    use crate::infra::memory::MemoryPhoneRepository;

    const ALICE: AccountId = AccountId::from_db(1);
    const BOB: AccountId = AccountId::from_db(2);

    fn repo() -> Arc<MemoryPhoneRepository> {
        Arc::new(MemoryPhoneRepository::new())
    }

    async fn add(repo: &Arc<MemoryPhoneRepository>, owner: AccountId, number: &str) -> PhoneId {
        AddPhoneUseCase::new(repo.clone())
            .execute(
                owner,
                AddPhoneInput {
                    phone_number: number.to_string(),
                    description: "desc".to_string(),
                    is_fax: false,
                },
            )
            .await
            .unwrap()
            .id
    }

    fn update(id: PhoneId, number: &str) -> UpdatePhoneInput {
        UpdatePhoneInput {
            id: id.get(),
            phone_number: number.to_string(),
            description: "changed".to_string(),
            is_fax: true,
        }
    }

    #[tokio::test]
    async fn test_check_owner() {
        let repo = repo();
        let phone = add(&repo, ALICE, "555-0100").await;
        let guard = OwnershipGuard::new(repo.clone());

        assert!(guard.check_owner(phone, ALICE).await.unwrap());
        assert!(!guard.check_owner(phone, BOB).await.unwrap());
        assert!(matches!(
            guard.check_owner(PhoneId::from_db(99), ALICE).await,
            Err(PhoneError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_other_user_cannot_update_or_delete() {
        let repo = repo();
        let phone = add(&repo, ALICE, "555-0100").await;

        assert!(matches!(
            UpdatePhoneUseCase::new(repo.clone())
                .execute(BOB, update(phone, "555-9999"))
                .await,
            Err(PhoneError::Forbidden)
        ));
        assert!(matches!(
            DeletePhoneUseCase::new(repo.clone()).execute(BOB, phone).await,
            Err(PhoneError::Forbidden)
        ));

        let remaining = SearchPhonesUseCase::new(repo.clone())
            .execute(ALICE, "")
            .await
            .unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].phone_number, "555-0100");
        assert_eq!(remaining[0].description, "desc");
    }

    #[tokio::test]
    async fn test_owner_can_update_and_delete() {
        let repo = repo();
        let phone = add(&repo, ALICE, "555-0100").await;

        UpdatePhoneUseCase::new(repo.clone())
            .execute(ALICE, update(phone, "555-0199"))
            .await
            .unwrap();

        let phones = SearchPhonesUseCase::new(repo.clone())
            .execute(ALICE, "0199")
            .await
            .unwrap();
        assert_eq!(phones.len(), 1);
        assert!(phones[0].is_fax);
        assert_eq!(phones[0].description, "changed");

        DeletePhoneUseCase::new(repo.clone())
            .execute(ALICE, phone)
            .await
            .unwrap();
        assert!(matches!(
            DeletePhoneUseCase::new(repo.clone()).execute(ALICE, phone).await,
            Err(PhoneError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_owner_predicate_blocks_write_after_ownership_change() {
        let repo = repo();
        let phone = add(&repo, ALICE, "555-0100").await;

        // Ownership moves after the guard ran but before the write
        repo.force_owner(phone, BOB).await;

        use crate::domain::entities::PhoneUpdate;
        use crate::domain::repository::PhoneRepository;
        let write = PhoneUpdate {
            id: phone,
            phone_number: "555-0000".to_string(),
            description: "hijack".to_string(),
            is_fax: false,
        };
        assert!(!repo.update_owned(ALICE, &write).await.unwrap());
        assert!(!repo.delete_owned(ALICE, phone).await.unwrap());

        let bobs = repo.search(BOB, "").await.unwrap();
        assert_eq!(bobs[0].phone_number, "555-0100");
    }

    #[tokio::test]
    async fn test_duplicate_number_conflicts_across_users() {
        let repo = repo();
        add(&repo, ALICE, "555-0100").await;

        let result = AddPhoneUseCase::new(repo.clone())
            .execute(
                BOB,
                AddPhoneInput {
                    phone_number: "555-0100".to_string(),
                    description: "mine".to_string(),
                    is_fax: false,
                },
            )
            .await;
        assert!(matches!(result, Err(PhoneError::DuplicateNumber)));

        let other = add(&repo, ALICE, "555-0200").await;
        assert!(matches!(
            UpdatePhoneUseCase::new(repo.clone())
                .execute(ALICE, update(other, "555-0100"))
                .await,
            Err(PhoneError::DuplicateNumber)
        ));
    }

    #[tokio::test]
    async fn test_search_is_scoped_and_literal() {
        let repo = repo();
        add(&repo, ALICE, "555-0100").await;
        add(&repo, ALICE, "777-0100").await;
        add(&repo, BOB, "555-0300").await;

        let search = SearchPhonesUseCase::new(repo.clone());
        assert_eq!(search.execute(ALICE, "").await.unwrap().len(), 2);
        assert_eq!(search.execute(ALICE, "555").await.unwrap().len(), 1);
        assert_eq!(search.execute(BOB, "0100").await.unwrap().len(), 0);
        assert_eq!(search.execute(ALICE, "%").await.unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_required_fields() {
        let repo = repo();
        let add_use_case = AddPhoneUseCase::new(repo.clone());

        let missing = add_use_case
            .execute(
                ALICE,
                AddPhoneInput {
                    phone_number: String::new(),
                    description: "desc".to_string(),
                    is_fax: false,
                },
            )
            .await;
        assert!(matches!(missing, Err(PhoneError::Validation(_))));

        let no_id = UpdatePhoneUseCase::new(repo.clone())
            .execute(
                ALICE,
                UpdatePhoneInput {
                    id: 0,
                    phone_number: "555".to_string(),
                    description: "d".to_string(),
                    is_fax: false,
                },
            )
            .await;
        assert!(matches!(no_id, Err(PhoneError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_missing_record_is_not_found() {
        let repo = repo();
        assert!(matches!(
            UpdatePhoneUseCase::new(repo.clone())
                .execute(ALICE, update(PhoneId::from_db(42), "555"))
                .await,
            Err(PhoneError::NotFound)
        ));
    }
}

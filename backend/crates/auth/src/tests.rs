//! Use case tests against the in-memory repository

#[cfg(test)]
mod support {
    use std::sync::Arc;

    use platform::password::HashCost;

    use crate::application::config::AuthConfig;
    use crate::application::{
        RequestAuthorizer, SessionAuthenticator, SignInInput, SignUpInput, SignUpUseCase,
    };
    use crate::error::AuthResult;
    use crate::infra::memory::MemoryAuthRepository;

    pub fn config() -> AuthConfig {
        AuthConfig::development().with_password_hashing(HashCost::testing(), None)
    }

    pub struct Harness {
        pub repo: Arc<MemoryAuthRepository>,
        pub config: Arc<AuthConfig>,
    }

    impl Harness {
        pub fn new() -> Self {
            Self::with_config(config())
        }

        pub fn with_config(config: AuthConfig) -> Self {
            Self {
                repo: Arc::new(MemoryAuthRepository::new()),
                config: Arc::new(config),
            }
        }

        pub async fn register(&self, login: &str, password: &str) -> AuthResult<i64> {
            SignUpUseCase::new(self.repo.clone(), self.config.clone())
                .execute(SignUpInput {
                    login: login.to_string(),
                    password: password.to_string(),
                    name: format!("{login} name"),
                    age: 30,
                })
                .await
                .map(|out| out.account_id.get())
        }

        pub async fn sign_in(&self, login: &str, password: &str) -> AuthResult<String> {
            SessionAuthenticator::new(self.repo.clone(), self.config.clone())
                .authenticate(SignInInput {
                    login: login.to_string(),
                    password: password.to_string(),
                })
                .await
                .map(|out| out.session_token)
        }

        pub fn authorizer(&self) -> RequestAuthorizer<MemoryAuthRepository> {
            RequestAuthorizer::new(self.repo.clone(), self.config.clone())
        }
    }
}

#[cfg(test)]
mod sign_in_tests {
    use std::sync::Arc;

    use platform::password::HashCost;

    use super::support::Harness;
    use crate::application::config::AuthConfig;
    use crate::domain::entity::SessionClaims;
    use crate::domain::repository::AccountRepository;
    use crate::domain::value_object::Login;
    use crate::error::{AuthError, SessionRejection};

    #[tokio::test]
    async fn test_register_sign_in_authorize_scenario() {
        let h = Harness::new();

        let alice_id = h.register("alice", "p@ss1").await.unwrap();
        let token = h.sign_in("alice", "p@ss1").await.unwrap();

        let authorized = h.authorizer().authorize(Some(&token)).await.unwrap();
        assert_eq!(authorized.get(), alice_id);

        assert!(matches!(
            h.sign_in("alice", "wrong").await,
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            h.authorizer().authorize(Some("garbage-token")).await,
            Err(AuthError::Unauthenticated(_))
        ));
    }

    #[tokio::test]
    async fn test_token_carries_login_and_user_id() {
        let h = Harness::new();
        let id = h.register("alice", "p@ss1").await.unwrap();
        let token = h.sign_in("alice", "p@ss1").await.unwrap();

        let claims: SessionClaims = h.config.tokens().decode(&token).unwrap();
        assert_eq!(claims.login, "alice");
        assert_eq!(claims.user_id, id);
    }

    #[tokio::test]
    async fn test_unknown_login_matches_wrong_password() {
        let h = Harness::new();
        h.register("alice", "p@ss1").await.unwrap();

        let unknown = h.sign_in("mallory", "p@ss1").await.unwrap_err();
        let wrong = h.sign_in("alice", "nope").await.unwrap_err();

        assert!(matches!(unknown, AuthError::InvalidCredentials));
        assert!(matches!(wrong, AuthError::InvalidCredentials));
        assert_eq!(unknown.to_string(), wrong.to_string());
    }

    #[tokio::test]
    async fn test_empty_credentials_are_validation_errors() {
        let h = Harness::new();
        assert!(matches!(
            h.sign_in("", "p@ss1").await,
            Err(AuthError::Validation(_))
        ));
        assert!(matches!(
            h.sign_in("alice", "").await,
            Err(AuthError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_password_is_stored_hashed() {
        let h = Harness::new();
        h.register("alice", "p@ss1").await.unwrap();

        let login = Login::new("alice").unwrap();
        let account = h.repo.find_by_login(&login).await.unwrap().unwrap();
        let stored = account.password_hash.as_phc_string();
        assert!(stored.starts_with("$argon2id$"));
        assert!(!stored.contains("p@ss1"));
    }

    #[tokio::test]
    async fn test_outdated_hash_is_upgraded_on_sign_in() {
        let h = Harness::new();
        h.register("alice", "p@ss1").await.unwrap();

        let stronger = AuthConfig::development().with_password_hashing(
            HashCost {
                memory_kib: 16,
                iterations: 2,
                parallelism: 1,
            },
            None,
        );
        let upgraded = Harness {
            repo: h.repo.clone(),
            config: Arc::new(stronger),
        };
        upgraded.sign_in("alice", "p@ss1").await.unwrap();

        let login = Login::new("alice").unwrap();
        let account = h.repo.find_by_login(&login).await.unwrap().unwrap();
        assert!(account.password_hash.as_phc_string().contains("m=16,t=2,p=1"));
        assert!(!upgraded.config.hasher().needs_rehash(&account.password_hash));

        upgraded.sign_in("alice", "p@ss1").await.unwrap();
        assert!(matches!(
            upgraded.sign_in("alice", "wrong").await,
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_missing_token() {
        let h = Harness::new();
        assert!(matches!(
            h.authorizer().authorize(None).await,
            Err(AuthError::Unauthenticated(SessionRejection::MissingToken))
        ));
    }
}

#[cfg(test)]
mod authorize_tests {
    use std::time::Duration;

    use platform::token::{SigningKey, TokenCodec};

    use super::support::{Harness, config};
    use crate::application::ChangeLoginUseCase;
    use crate::domain::entity::SessionClaims;
    use crate::error::{AuthError, SessionRejection};

    #[tokio::test]
    async fn test_expired_token_is_rejected() {
        let h = Harness::with_config(config().with_session_ttl(Some(Duration::ZERO)));
        h.register("alice", "p@ss1").await.unwrap();
        let token = h.sign_in("alice", "p@ss1").await.unwrap();

        assert!(matches!(
            h.authorizer().authorize(Some(&token)).await,
            Err(AuthError::Unauthenticated(SessionRejection::Expired))
        ));
    }

    #[tokio::test]
    async fn test_token_from_other_key_is_rejected() {
        let h = Harness::new();
        let id = h.register("alice", "p@ss1").await.unwrap();

        let foreign = TokenCodec::new(SigningKey::generate())
            .encode(&SessionClaims {
                login: "alice".to_string(),
                user_id: id,
            })
            .unwrap();

        assert!(matches!(
            h.authorizer().authorize(Some(&foreign)).await,
            Err(AuthError::Unauthenticated(SessionRejection::BadSignature))
        ));
    }

    #[tokio::test]
    async fn test_token_for_unknown_account_is_rejected() {
        let h = Harness::new();
        let token = h
            .config
            .tokens()
            .encode(&SessionClaims {
                login: "ghost".to_string(),
                user_id: 999,
            })
            .unwrap();

        assert!(matches!(
            h.authorizer().authorize(Some(&token)).await,
            Err(AuthError::Unauthenticated(SessionRejection::UnknownAccount))
        ));
    }

    #[tokio::test]
    async fn test_non_positive_user_id_is_malformed() {
        let h = Harness::new();
        let token = h
            .config
            .tokens()
            .encode(&SessionClaims {
                login: "alice".to_string(),
                user_id: 0,
            })
            .unwrap();

        assert!(matches!(
            h.authorizer().authorize(Some(&token)).await,
            Err(AuthError::Unauthenticated(SessionRejection::Malformed))
        ));
    }

    #[tokio::test]
    async fn test_login_change_invalidates_old_tokens() {
        let h = Harness::new();
        let id = h.register("alice", "p@ss1").await.unwrap();
        let old_token = h.sign_in("alice", "p@ss1").await.unwrap();
        let caller = h.authorizer().authorize(Some(&old_token)).await.unwrap();
        assert_eq!(caller.get(), id);

        let new_token = ChangeLoginUseCase::new(h.repo.clone(), h.config.clone())
            .execute(caller, "alice2")
            .await
            .unwrap();

        assert!(matches!(
            h.authorizer().authorize(Some(&old_token)).await,
            Err(AuthError::Unauthenticated(SessionRejection::StaleLogin))
        ));
        assert_eq!(
            h.authorizer().authorize(Some(&new_token)).await.unwrap(),
            caller
        );

        assert!(h.sign_in("alice2", "p@ss1").await.is_ok());
        assert!(matches!(
            h.sign_in("alice", "p@ss1").await,
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_login_change_to_taken_login_conflicts() {
        let h = Harness::new();
        let alice = h.register("alice", "p@ss1").await.unwrap();
        h.register("bob", "hunter2").await.unwrap();

        let result = ChangeLoginUseCase::new(h.repo.clone(), h.config.clone())
            .execute(kernel::id::AccountId::from_db(alice), "bob")
            .await;
        assert!(matches!(result, Err(AuthError::LoginTaken)));
    }
}

#[cfg(test)]
mod sign_up_tests {
    use std::sync::Arc;

    use platform::password::PasswordPolicy;

    use super::support::{Harness, config};
    use crate::application::{GetProfileUseCase, SignUpInput, SignUpUseCase};
    use crate::error::AuthError;

    fn input(login: &str, password: &str, name: &str, age: i32) -> SignUpInput {
        SignUpInput {
            login: login.to_string(),
            password: password.to_string(),
            name: name.to_string(),
            age,
        }
    }

    #[tokio::test]
    async fn test_duplicate_login_conflicts() {
        let h = Harness::new();
        h.register("alice", "p@ss1").await.unwrap();
        assert!(matches!(
            h.register("alice", "other").await,
            Err(AuthError::LoginTaken)
        ));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_duplicate_registration_has_one_winner() {
        let h = Harness::new();
        let use_case = Arc::new(SignUpUseCase::new(h.repo.clone(), h.config.clone()));

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let use_case = use_case.clone();
                tokio::spawn(async move {
                    use_case.execute(input("racer", "p@ss1", "Racer", 20)).await
                })
            })
            .collect();

        let mut ok = 0;
        let mut conflicts = 0;
        for task in tasks {
            match task.await.unwrap() {
                Ok(_) => ok += 1,
                Err(AuthError::LoginTaken) => conflicts += 1,
                Err(other) => panic!("unexpected error: {other}"),
            }
        }

        assert_eq!(ok, 1);
        assert_eq!(conflicts, 7);
        assert_eq!(h.repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_required_fields() {
        let h = Harness::new();
        let use_case = SignUpUseCase::new(h.repo.clone(), h.config.clone());

        for bad in [
            input("", "p@ss1", "Alice", 30),
            input("alice", "", "Alice", 30),
            input("alice", "p@ss1", "", 30),
            input("alice", "p@ss1", "Alice", 0),
            input("alice", "p@ss1", "Alice", -1),
        ] {
            assert!(matches!(
                use_case.execute(bad).await,
                Err(AuthError::Validation(_))
            ));
        }
        assert!(h.repo.is_empty().await);
    }

    #[tokio::test]
    async fn test_password_policy_applies_at_registration_only() {
        let h = Harness::new();
        h.register("alice", "p@ss1").await.unwrap();

        let strict = Harness::with_config(config().with_password_policy(PasswordPolicy::strict()));
        let strict = Harness {
            repo: h.repo.clone(),
            config: strict.config,
        };

        assert!(matches!(
            strict.register("bob", "short").await,
            Err(AuthError::Validation(_))
        ));
        // Existing short password still signs in
        assert!(strict.sign_in("alice", "p@ss1").await.is_ok());
    }

    #[tokio::test]
    async fn test_profile_lookup() {
        let h = Harness::new();
        let id = h.register("alice", "p@ss1").await.unwrap();

        let profile = GetProfileUseCase::new(h.repo.clone())
            .execute("alice name")
            .await
            .unwrap();
        assert_eq!(profile.id.get(), id);
        assert_eq!(profile.age, 30);

        assert!(matches!(
            GetProfileUseCase::new(h.repo.clone()).execute("nobody").await,
            Err(AuthError::NotFound)
        ));
    }
}

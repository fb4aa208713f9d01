//! Sign Up Use Case
//!
//! Creates a new account.

use std::sync::Arc;

use kernel::id::AccountId;
use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::domain::entity::NewAccount;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::Login;
use crate::error::{AuthError, AuthResult};

/// Sign up input
pub struct SignUpInput {
    pub login: String,
    pub password: String,
    pub name: String,
    pub age: i32,
}

/// Sign up output
#[derive(Debug)]
pub struct SignUpOutput {
    pub account_id: AccountId,
}

/// Sign up use case
pub struct SignUpUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> SignUpUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<SignUpOutput> {
        if input.login.trim().is_empty()
            || input.password.is_empty()
            || input.name.trim().is_empty()
            || input.age == 0
        {
            return Err(AuthError::Validation("Missing required fields".to_string()));
        }
        if input.age < 0 {
            return Err(AuthError::Validation("Age must be positive".to_string()));
        }

        let login = Login::new(&input.login).map_err(|e| AuthError::Validation(e.to_string()))?;

        let password = ClearTextPassword::new(input.password);
        self.config
            .password_policy
            .check(&password)
            .map_err(|e| AuthError::Validation(e.to_string()))?;
        let password_hash = self.config.hasher().hash(&password)?;

        // Uniqueness is decided by the insert itself
        let account = self
            .repo
            .insert(&NewAccount {
                login,
                password_hash,
                name: input.name.trim().to_string(),
                age: input.age,
            })
            .await?;

        tracing::info!(account_id = %account.account_id, "User signed up");

        Ok(SignUpOutput {
            account_id: account.account_id,
        })
    }
}

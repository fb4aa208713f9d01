//! PostgreSQL Repository Implementations

use kernel::id::AccountId;
use platform::password::HashedPassword;
use sqlx::PgPool;

use crate::domain::entity::{Account, AccountProfile, NewAccount};
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::Login;
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Map a UNIQUE violation on `accounts.login` to `LoginTaken`
fn map_unique_login(err: sqlx::Error) -> AuthError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => AuthError::LoginTaken,
        _ => AuthError::Database(err),
    }
}

// ============================================================================
// Account Repository Implementation
// ============================================================================

impl AccountRepository for PgAuthRepository {
    async fn find_by_login(&self, login: &Login) -> AuthResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, login, password, name, age
            FROM accounts
            WHERE login = $1
            "#,
        )
        .bind(login.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(AccountRow::into_account))
    }

    async fn find_by_id(&self, account_id: AccountId) -> AuthResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, login, password, name, age
            FROM accounts
            WHERE id = $1
            "#,
        )
        .bind(account_id.get())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(AccountRow::into_account))
    }

    async fn insert(&self, account: &NewAccount) -> AuthResult<Account> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            INSERT INTO accounts (login, password, name, age)
            VALUES ($1, $2, $3, $4)
            RETURNING id, login, password, name, age
            "#,
        )
        .bind(account.login.as_str())
        .bind(account.password_hash.as_phc_string())
        .bind(&account.name)
        .bind(account.age)
        .fetch_one(&self.pool)
        .await
        .map_err(map_unique_login)?;

        Ok(row.into_account())
    }

    async fn find_profile_by_name(&self, name: &str) -> AuthResult<Option<AccountProfile>> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT id, name, age
            FROM accounts
            WHERE name = $1
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| AccountProfile {
            id: AccountId::from_db(r.id),
            name: r.name,
            age: r.age,
        }))
    }

    async fn update_login(&self, account_id: AccountId, login: &Login) -> AuthResult<bool> {
        let updated = sqlx::query("UPDATE accounts SET login = $2 WHERE id = $1")
            .bind(account_id.get())
            .bind(login.as_str())
            .execute(&self.pool)
            .await
            .map_err(map_unique_login)?
            .rows_affected();

        Ok(updated > 0)
    }

    async fn update_password(
        &self,
        account_id: AccountId,
        password_hash: &HashedPassword,
    ) -> AuthResult<bool> {
        let updated = sqlx::query("UPDATE accounts SET password = $2 WHERE id = $1")
            .bind(account_id.get())
            .bind(password_hash.as_phc_string())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(updated > 0)
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct AccountRow {
    id: i64,
    login: String,
    password: String,
    name: String,
    age: i32,
}

impl AccountRow {
    fn into_account(self) -> Account {
        Account {
            account_id: AccountId::from_db(self.id),
            login: Login::from_db(self.login),
            password_hash: HashedPassword::from_db(self.password),
            name: self.name,
            age: self.age,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ProfileRow {
    id: i64,
    name: String,
    age: i32,
}

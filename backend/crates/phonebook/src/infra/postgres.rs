//! PostgreSQL Repository Implementation

use kernel::id::{AccountId, PhoneId};
use sqlx::PgPool;

use crate::domain::entities::{NewPhone, Phone, PhoneUpdate};
use crate::domain::repository::PhoneRepository;
use crate::error::{PhoneError, PhoneResult};

/// PostgreSQL-backed phone repository
#[derive(Clone)]
pub struct PgPhoneRepository {
    pool: PgPool,
}

impl PgPhoneRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_unique_number(err: sqlx::Error) -> PhoneError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            PhoneError::DuplicateNumber
        }
        _ => PhoneError::Database(err),
    }
}

/// Escape LIKE metacharacters so the query matches literally
pub(crate) fn like_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for c in query.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

impl PhoneRepository for PgPhoneRepository {
    async fn find_owner(&self, phone_id: PhoneId) -> PhoneResult<Option<AccountId>> {
        let owner = sqlx::query_scalar::<_, i64>("SELECT user_id FROM phones WHERE id = $1")
            .bind(phone_id.get())
            .fetch_optional(&self.pool)
            .await?;

        Ok(owner.map(AccountId::from_db))
    }

    async fn insert(&self, phone: &NewPhone) -> PhoneResult<Phone> {
        let row = sqlx::query_as::<_, PhoneRow>(
            r#"
            INSERT INTO phones (user_id, phone, description, is_fax)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, phone, description, is_fax
            "#,
        )
        .bind(phone.user_id.get())
        .bind(&phone.phone_number)
        .bind(&phone.description)
        .bind(phone.is_fax)
        .fetch_one(&self.pool)
        .await
        .map_err(map_unique_number)?;

        Ok(row.into_phone())
    }

    async fn search(&self, owner: AccountId, query: &str) -> PhoneResult<Vec<Phone>> {
        let rows = sqlx::query_as::<_, PhoneRow>(
            r#"
            SELECT id, user_id, phone, description, is_fax
            FROM phones
            WHERE user_id = $1 AND phone LIKE $2 ESCAPE '\'
            ORDER BY id
            "#,
        )
        .bind(owner.get())
        .bind(like_pattern(query))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(PhoneRow::into_phone).collect())
    }

    async fn update_owned(&self, owner: AccountId, update: &PhoneUpdate) -> PhoneResult<bool> {
        let updated = sqlx::query(
            r#"
            UPDATE phones SET
                phone = $3,
                description = $4,
                is_fax = $5
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(update.id.get())
        .bind(owner.get())
        .bind(&update.phone_number)
        .bind(&update.description)
        .bind(update.is_fax)
        .execute(&self.pool)
        .await
        .map_err(map_unique_number)?
        .rows_affected();

        Ok(updated > 0)
    }

    async fn delete_owned(&self, owner: AccountId, phone_id: PhoneId) -> PhoneResult<bool> {
        let deleted = sqlx::query("DELETE FROM phones WHERE id = $1 AND user_id = $2")
            .bind(phone_id.get())
            .bind(owner.get())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct PhoneRow {
    id: i64,
    user_id: i64,
    phone: String,
    description: String,
    is_fax: bool,
}

impl PhoneRow {
    fn into_phone(self) -> Phone {
        Phone {
            id: PhoneId::from_db(self.id),
            user_id: AccountId::from_db(self.user_id),
            phone_number: self.phone,
            description: self.description,
            is_fax: self.is_fax,
        }
    }
}

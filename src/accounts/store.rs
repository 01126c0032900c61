use async_trait::async_trait;
use sqlx::PgPool;

use crate::accounts::error::AccountError;
use crate::accounts::repo_types::{AccountRow, NewAccount};

/// Relational operations the repository needs.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Insert one row and return the id the store assigned.
    async fn insert(&self, account: &NewAccount) -> Result<i32, AccountError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<AccountRow>, AccountError>;
}

#[derive(Clone)]
pub struct PgAccountStore {
    db: PgPool,
}

impl PgAccountStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn insert(&self, account: &NewAccount) -> Result<i32, AccountError> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO users (name, email, password, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&account.name)
        .bind(&account.email)
        .bind(&account.password_hash)
        .bind(account.role)
        .fetch_one(&self.db)
        .await
        .map_err(AccountError::from_store)?;
        Ok(id)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<AccountRow>, AccountError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, name, email, role, created_at, updated_at
            FROM users
            WHERE id = $1
            LIMIT 1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .map_err(AccountError::from_store)?;
        Ok(row)
    }
}

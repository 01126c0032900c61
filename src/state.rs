use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

use crate::accounts::{AccountRepository, PgAccountStore};
use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub accounts: AccountRepository,
}

impl AppState {
    pub async fn init(config: &AppConfig) -> anyhow::Result<Self> {
        let db = PgPoolOptions::new()
            .max_connections(10)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;

        let accounts = AccountRepository::new(Arc::new(PgAccountStore::new(db)));
        Ok(Self { accounts })
    }

    #[cfg(test)]
    pub fn with_store(store: Arc<dyn crate::accounts::store::AccountStore>) -> Self {
        Self {
            accounts: AccountRepository::new(store),
        }
    }
}

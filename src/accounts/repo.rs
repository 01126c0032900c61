use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::accounts::dto::{CreateResponse, GetResponse, Timestamp};
use crate::accounts::error::AccountError;
use crate::accounts::password::hash_password;
use crate::accounts::repo_types::{AccountRow, NewAccount};
use crate::accounts::role::Role;
use crate::accounts::store::AccountStore;

/// Maps account RPCs onto `users` rows.
///
/// Holds no state besides the injected store, so clones are cheap and every
/// call is independent of the others. Store faults are returned as they come;
/// retrying is the caller's decision.
#[derive(Clone)]
pub struct AccountRepository {
    store: Arc<dyn AccountStore>,
}

impl AccountRepository {
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self { store }
    }

    /// Hash the password, encode the role and insert a new row.
    ///
    /// Not idempotent: identical input twice yields two accounts.
    pub async fn create_account(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<CreateResponse, AccountError> {
        let password_hash = hash_password(password)?;

        let account = NewAccount {
            name: name.to_string(),
            email: email.to_string(),
            password_hash,
            role: role.as_db_str(),
        };
        let id = self.store.insert(&account).await?;

        info!(id, %role, "inserted account");
        Ok(CreateResponse { id: i64::from(id) })
    }

    pub async fn get_account(&self, id: i64) -> Result<GetResponse, AccountError> {
        // Keys are 32-bit in the store; anything wider cannot exist.
        let Ok(key) = i32::try_from(id) else {
            debug!(id, "account id out of key range");
            return Err(AccountError::NotFound(id));
        };

        let Some(row) = self.store.find_by_id(key).await? else {
            debug!(id, "no account with this id");
            return Err(AccountError::NotFound(id));
        };

        decode_row(row)
    }

    /// Acknowledged without touching storage.
    pub async fn update_account(&self, id: i64) -> Result<(), AccountError> {
        warn!(id, "update_account is not persisted");
        Ok(())
    }

    /// Acknowledged without touching storage.
    pub async fn delete_account(&self, id: i64) -> Result<(), AccountError> {
        warn!(id, "delete_account is not persisted");
        Ok(())
    }
}

fn decode_row(row: AccountRow) -> Result<GetResponse, AccountError> {
    let role = row.role.parse::<Role>().inspect_err(|_| {
        warn!(id = row.id, role = %row.role, "stored role is not recognised");
    })?;

    Ok(GetResponse {
        id: i64::from(row.id),
        name: row.name,
        email: row.email,
        role,
        created_at: Timestamp::from(row.created_at),
        updated_at: row.updated_at.map(Timestamp::from),
    })
}

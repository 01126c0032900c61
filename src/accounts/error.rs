use thiserror::Error;

/// SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("failed to hash password: {0}")]
    Hashing(String),

    #[error("failed to build query: {0}")]
    QueryBuild(String),

    #[error("storage error: {0}")]
    Storage(#[source] sqlx::Error),

    #[error("account {0} does not exist")]
    NotFound(i64),

    #[error("unknown role: {0}")]
    UnknownRole(String),

    #[error("account conflicts with an existing one: {0}")]
    Conflict(String),
}

impl AccountError {
    /// Sort an sqlx failure into the taxonomy.
    ///
    /// Only a parameter that could not be encoded counts as a query-build
    /// failure; it happens client side before anything is sent. Every fault
    /// reported by the store, and every scan/decode fault, is `Storage`,
    /// except a unique violation.
    pub fn from_store(err: sqlx::Error) -> Self {
        if let sqlx::Error::Encode(e) = &err {
            return AccountError::QueryBuild(e.to_string());
        }
        if let sqlx::Error::Database(db) = &err {
            if db.code().is_some_and(|code| code == UNIQUE_VIOLATION) {
                return AccountError::Conflict(db.message().to_string());
            }
        }
        AccountError::Storage(err)
    }
}

use sqlx::FromRow;
use time::PrimitiveDateTime;

/// Account row as read back from `users`.
#[derive(Debug, Clone, FromRow)]
pub struct AccountRow {
    pub id: i32,                            // serial primary key
    pub name: String,
    pub email: String,
    pub role: String,                       // "User" | "Admin", decoded strictly
    pub created_at: PrimitiveDateTime,      // set by the store on insert
    pub updated_at: Option<PrimitiveDateTime>,
}

/// Values bound into the insert statement.
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password_hash: String,              // argon2 PHC string, never logged
    pub role: &'static str,
}

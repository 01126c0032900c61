use std::fmt;

use serde::{Deserialize, Serialize};
use time::PrimitiveDateTime;

use crate::accounts::role::Role;

/// Point in time on the wire: seconds and nanoseconds since the Unix epoch, UTC.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Timestamp {
    pub seconds: i64,
    pub nanos: i32,
}

impl From<PrimitiveDateTime> for Timestamp {
    // The store keeps zone-less timestamps; they are UTC.
    fn from(dt: PrimitiveDateTime) -> Self {
        let utc = dt.assume_utc();
        Self {
            seconds: utc.unix_timestamp(),
            nanos: utc.nanosecond() as i32,
        }
    }
}

/// Request body for account creation.
#[derive(Deserialize)]
pub struct CreateRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub password_confirm: Option<String>,
    pub role: Role,
}

impl fmt::Debug for CreateRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("password_confirm", &self.password_confirm.as_ref().map(|_| "<redacted>"))
            .field("role", &self.role)
            .finish()
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateResponse {
    pub id: i64,
}

/// Public view of an account. Carries no credential material.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GetResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

/// Accepted for contract compatibility; updates are not persisted.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
}

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::accounts::error::AccountError;

/// Access level of an account.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Role {
    User,
    Admin,
}

impl Role {
    /// Text stored in the `users.role` column.
    pub fn as_db_str(self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Admin => "Admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_db_str())
    }
}

/// Strict decode of the stored text. Casing must match exactly.
impl FromStr for Role {
    type Err = AccountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "User" => Ok(Role::User),
            "Admin" => Ok(Role::Admin),
            other => Err(AccountError::UnknownRole(other.to_string())),
        }
    }
}

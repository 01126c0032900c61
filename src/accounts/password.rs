use argon2::{
    password_hash::{PasswordHasher, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::error;

use crate::accounts::error::AccountError;

/// Hash with argon2id at its default cost. The plaintext never leaves this function.
pub fn hash_password(plain: &str) -> Result<String, AccountError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            AccountError::Hashing(e.to_string())
        })?
        .to_string();
    Ok(hash)
}

/// Login is not part of this service; used to check stored hashes in tests.
#[cfg(test)]
pub fn verify_password(plain: &str, hash: &str) -> Result<bool, AccountError> {
    use argon2::password_hash::{PasswordHash, PasswordVerifier};

    let parsed = PasswordHash::new(hash).map_err(|e| {
        error!(error = %e, "argon2 parse hash error");
        AccountError::Hashing(e.to_string())
    })?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

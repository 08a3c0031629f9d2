//! Password hashing at the authentication boundary.
//!
//! Passwords are stored as salted Argon2 PHC strings and verified with
//! a one-way comparison; the plaintext never reaches the store.

use crate::error::{MarketError, Result};
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// Hash a password with a fresh random salt.
///
/// # Errors
///
/// Returns a storage error if hashing fails (which indicates a
/// misconfigured hasher, not bad input).
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|err| MarketError::Storage(format!("password hashing failed: {err}")))?;
    Ok(hash.to_string())
}

/// Verify a password against a stored PHC-string hash.
///
/// Returns `false` both for a wrong password and for a hash that does
/// not parse, so a corrupted record degrades to a failed login rather
/// than a server error.
#[must_use]
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    PasswordHash::new(password_hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

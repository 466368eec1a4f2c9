//! Credential storage for registration, login and password changes.
//!
//! Stored values are argon2id PHC strings. Both operations run on the blocking pool
//! and surface failures as [`AppError::Internal`]; a wrong password is `Ok(false)`,
//! never an error, so login can answer it like an unknown username.

use anyhow::{anyhow, Context};
use argon2::{
    password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;

use crate::error::{AppError, Result};

/// PHC string for `plain` under a fresh salt.
pub async fn hash(plain: String) -> Result<String> {
    let phc = tokio::task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(plain.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| anyhow!("hash password: {e}"))
    })
    .await
    .context("password hashing task")??;
    Ok(phc)
}

/// Whether `plain` is the password behind the stored PHC string `stored`.
pub async fn verify(plain: String, stored: String) -> Result<bool> {
    tokio::task::spawn_blocking(move || check(&plain, &stored))
        .await
        .context("password verify task")?
}

fn check(plain: &str, stored: &str) -> Result<bool> {
    let parsed = PasswordHash::new(stored)
        .map_err(|e| AppError::Internal(anyhow!("stored password hash is malformed: {e}")))?;
    match Argon2::default().verify_password(plain.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AppError::Internal(anyhow!("verify password: {e}"))),
    }
}

/**
 * Password Hashing
 *
 * Thin async wrappers around bcrypt. Hashing and verification are CPU-bound,
 * so both run on tokio's blocking pool instead of a runtime worker.
 */

use thiserror::Error;

/// Lowest bcrypt work factor accepted by the hasher
pub const MIN_COST: u32 = 4;

/// Highest bcrypt work factor accepted by the hasher
pub const MAX_COST: u32 = 31;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),

    #[error("hashing task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Hash a plaintext password with a salted bcrypt digest
pub async fn hash_password(password: &str, cost: u32) -> Result<String, PasswordError> {
    let password = password.to_owned();
    let digest = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;
    Ok(digest)
}

/// Check a plaintext password against a stored bcrypt digest
///
/// Returns `Ok(false)` on mismatch. A digest that is not valid bcrypt is an
/// error, not a mismatch.
pub async fn verify_password(password: &str, digest: &str) -> Result<bool, PasswordError> {
    let password = password.to_owned();
    let digest = digest.to_owned();
    let valid = tokio::task::spawn_blocking(move || bcrypt::verify(password, &digest)).await??;
    Ok(valid)
}

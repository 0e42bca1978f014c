use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use lazy_static::lazy_static;
use rand::rngs::OsRng;
use tracing::error;

#[cfg(not(test))]
fn hasher() -> Argon2<'static> {
    Argon2::default()
}

// Cheap parameters so handler tests don't spend seconds per signup.
#[cfg(test)]
fn hasher() -> Argon2<'static> {
    let params = argon2::Params::new(1024, 1, 1, None).unwrap();
    Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params)
}

pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = hasher()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            anyhow::anyhow!(e.to_string())
        })?
        .to_string();
    Ok(hash)
}

pub fn verify_password(plain: &str, hash: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| {
        error!(error = %e, "argon2 parse hash error");
        anyhow::anyhow!(e.to_string())
    })?;
    Ok(hasher().verify_password(plain.as_bytes(), &parsed).is_ok())
}

lazy_static! {
    // Checked against when an email is unknown, so that path costs a full verification too.
    static ref DUMMY_HASH: String = hash_password("dummy-password").unwrap_or_default();
}

/// Builds the dummy hash on the blocking pool so no request pays for it.
pub async fn prime_dummy_hash() -> anyhow::Result<()> {
    tokio::task::spawn_blocking(|| lazy_static::initialize(&DUMMY_HASH)).await?;
    Ok(())
}

/// Runs a full verification against a throwaway hash; always `false`.
pub async fn verify_dummy_blocking(plain: String) -> bool {
    tokio::task::spawn_blocking(move || verify_password(&plain, &DUMMY_HASH).unwrap_or(false))
        .await
        .unwrap_or(false)
}

/// Hashes on the blocking pool; Argon2 is deliberately slow.
pub async fn hash_password_blocking(plain: String) -> anyhow::Result<String> {
    tokio::task::spawn_blocking(move || hash_password(&plain)).await?
}

pub async fn verify_password_blocking(plain: String, hash: String) -> anyhow::Result<bool> {
    tokio::task::spawn_blocking(move || verify_password(&plain, &hash)).await?
}

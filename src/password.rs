// ABOUTME: Password credential store built on Argon2id PHC-string hashes
// ABOUTME: Derives verifiers with per-credential random salts and checks candidates in constant time

use anyhow::{anyhow, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, SaltString},
    Argon2, PasswordHasher, PasswordVerifier,
};

/// Derive a stored verifier from a plaintext password.
///
/// The result is a PHC string carrying the Argon2id parameters and a fresh
/// random salt, so the plaintext is never recoverable from storage.
pub fn derive(plaintext: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map_err(|e| anyhow!("password hashing failed: {}", e))?;
    Ok(hash.to_string())
}

/// Check a candidate password against a stored verifier.
///
/// A malformed verifier is treated as a mismatch rather than an error, so a
/// corrupt row can never authenticate anyone.
pub fn check(plaintext: &str, verifier: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(verifier) else {
        return false;
    };
    Argon2::default()
        .verify_password(plaintext.as_bytes(), &parsed)
        .is_ok()
}

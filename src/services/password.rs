// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Password hashing (PBKDF2-HMAC-SHA256).
//!
//! Encoded form: `pbkdf2-sha256$<iterations>$<salt>$<hash>` with base64
//! (standard, no padding) salt and hash.

use base64::{engine::general_purpose::STANDARD_NO_PAD as BASE64, Engine as _};
use ring::pbkdf2;
use ring::rand::{SecureRandom, SystemRandom};
use std::num::NonZeroU32;

const SCHEME: &str = "pbkdf2-sha256";
const SALT_LEN: usize = 16;
const HASH_LEN: usize = 32;

/// Default work factor for new hashes.
pub const DEFAULT_ITERATIONS: u32 = 600_000;

/// Hash a password with a fresh random salt.
///
/// The iteration count is stored in the encoded hash, so changing it only
/// affects new hashes.
pub fn hash_password(password: &str, iterations: u32) -> Result<String, PasswordError> {
    let rounds = NonZeroU32::new(iterations).ok_or(PasswordError::Malformed)?;

    let mut salt = [0u8; SALT_LEN];
    SystemRandom::new()
        .fill(&mut salt)
        .map_err(|_| PasswordError::Rng)?;

    let mut hash = [0u8; HASH_LEN];
    pbkdf2::derive(pbkdf2::PBKDF2_HMAC_SHA256, rounds, &salt, password.as_bytes(), &mut hash);

    Ok(format!(
        "{}${}${}${}",
        SCHEME,
        iterations,
        BASE64.encode(salt),
        BASE64.encode(hash)
    ))
}

/// Check a password against an encoded hash.
///
/// Returns `Ok(false)` for a wrong password and `Err` only when the stored
/// hash cannot be parsed.
pub fn verify_password(password: &str, encoded: &str) -> Result<bool, PasswordError> {
    let parts: Vec<&str> = encoded.split('$').collect();
    let [scheme, iterations, salt, hash] = parts.as_slice() else {
        return Err(PasswordError::Malformed);
    };
    if *scheme != SCHEME {
        return Err(PasswordError::Malformed);
    }

    let iterations: u32 = iterations.parse().map_err(|_| PasswordError::Malformed)?;
    let rounds = NonZeroU32::new(iterations).ok_or(PasswordError::Malformed)?;
    let salt = BASE64.decode(salt).map_err(|_| PasswordError::Malformed)?;
    let hash = BASE64.decode(hash).map_err(|_| PasswordError::Malformed)?;

    Ok(pbkdf2::verify(pbkdf2::PBKDF2_HMAC_SHA256, rounds, &salt, password.as_bytes(), &hash).is_ok())
}

/// Errors from password hashing.
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("System RNG unavailable")]
    Rng,

    #[error("Malformed password hash")]
    Malformed,
}

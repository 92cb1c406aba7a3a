//! # Password Hashing
//!
//! Salted Argon2id hashing and verification of user passwords.
//!
//! Digests are stored in PHC string format, so the algorithm, version, work
//! factor and salt travel with the hash itself:
//!
//! ```text
//! $argon2id$v=19$m=19456,t=2,p=1$<salt>$<hash>
//! ```

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use std::sync::OnceLock;
use thiserror::Error;

/// Argon2 memory cost in KiB (19 MiB).
pub const MEMORY_COST_KIB: u32 = 19_456;

/// Argon2 iteration count.
pub const TIME_COST: u32 = 2;

/// Argon2 degree of parallelism.
pub const PARALLELISM: u32 = 1;

/// Longest accepted password, in bytes.
pub const MAX_PASSWORD_BYTES: usize = 4096;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("password exceeds {MAX_PASSWORD_BYTES} bytes")]
    TooLong,

    #[error("failed to hash password: {0}")]
    Hashing(String),
}

fn hasher() -> Result<Argon2<'static>, Error> {
    let params = Params::new(MEMORY_COST_KIB, TIME_COST, PARALLELISM, None)
        .map_err(|e| Error::Hashing(e.to_string()))?;

    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hash a password with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, Error> {
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(Error::TooLong);
    }

    let salt = SaltString::generate(&mut OsRng);

    let password_hash = hasher()?
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| Error::Hashing(e.to_string()))?
        .to_string();

    Ok(password_hash)
}

/// Check a plaintext password against a stored digest.
///
/// Returns `false` for a wrong password and for a digest that does not parse,
/// so storage-format problems never surface to the caller.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        return false;
    };

    // Verification reads the parameters from the digest, not from `hasher()`.
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

/// Check a password against the digest of an account that may not exist.
///
/// With no stored digest a full verification still runs, against a throwaway
/// digest with the same work factor, and the result is `false`. An unknown
/// username then takes as long to reject as a wrong password.
pub fn verify_stored_password(password: &str, stored: Option<&str>) -> bool {
    match stored {
        Some(hash) => verify_password(password, hash),
        None => {
            verify_password(password, dummy_digest());
            false
        }
    }
}

fn dummy_digest() -> &'static str {
    static DIGEST: OnceLock<String> = OnceLock::new();
    DIGEST.get_or_init(|| hash_password("no account has this password").unwrap_or_default())
}

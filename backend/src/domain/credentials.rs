//! Credential material handling.
//!
//! Passwords are stretched with salted, iterated SHA-256 and stored as an
//! opaque `iterations$salt$digest` string (hex-encoded salt and digest). The
//! rest of the domain treats [`PasswordHash`] as a black box; only this module
//! knows the encoding.

use rand::RngCore;
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Random salt length in bytes.
const SALT_LENGTH: usize = 64;

/// Stretching iterations applied to the salted digest.
const ITERATIONS: u32 = 10_000;

/// Errors raised when decoding stored credential material.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    /// The stored hash does not match the `iterations$salt$digest` encoding.
    #[error("stored password hash is malformed")]
    MalformedHash,
}

/// Opaque, persisted password hash.
///
/// Never serialised to clients; the [`Debug`] implementation redacts the
/// encoded material so it cannot leak through logs.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Rehydrate a hash from its persisted encoding.
    ///
    /// The encoding is not validated here; corruption surfaces as a
    /// [`CredentialError::MalformedHash`] at verification time.
    #[must_use]
    pub const fn from_storage(encoded: String) -> Self {
        Self(encoded)
    }

    /// Borrow the persisted encoding for storage.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// Hash a password with a fresh random salt.
#[must_use]
pub fn hash_password(password: &str) -> PasswordHash {
    let mut salt = [0u8; SALT_LENGTH];
    OsRng.fill_bytes(&mut salt);
    let digest = stretch(password, &salt, ITERATIONS);
    PasswordHash(format!(
        "{ITERATIONS}${}${}",
        hex::encode(salt),
        hex::encode(digest)
    ))
}

/// Verify a password attempt against stored credential material.
///
/// Returns `Ok(false)` for a wrong password; `Err` only when the stored
/// encoding itself cannot be decoded.
pub fn verify_password(attempt: &str, stored: &PasswordHash) -> Result<bool, CredentialError> {
    let mut parts = stored.0.splitn(3, '$');
    let iterations: u32 = parts
        .next()
        .and_then(|raw| raw.parse().ok())
        .ok_or(CredentialError::MalformedHash)?;
    let salt = parts
        .next()
        .and_then(|raw| hex::decode(raw).ok())
        .ok_or(CredentialError::MalformedHash)?;
    let expected = parts
        .next()
        .and_then(|raw| hex::decode(raw).ok())
        .ok_or(CredentialError::MalformedHash)?;

    let actual = stretch(attempt, &salt, iterations);
    Ok(fixed_time_eq(&actual, &expected))
}

/// Salted, iterated SHA-256 stretch.
fn stretch(password: &str, salt: &[u8], iterations: u32) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    let mut digest = hasher.finalize();
    for _ in 1..iterations {
        digest = Sha256::digest(digest);
    }
    digest.to_vec()
}

/// Compare digests without short-circuiting on the first mismatch.
fn fixed_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn round_trips_correct_password() {
        let stored = hash_password("hunter2");
        assert!(verify_password("hunter2", &stored).expect("verify"));
    }

    #[rstest]
    fn rejects_wrong_password() {
        let stored = hash_password("hunter2");
        assert!(!verify_password("hunter3", &stored).expect("verify"));
    }

    #[rstest]
    fn salts_are_unique_per_hash() {
        let first = hash_password("hunter2");
        let second = hash_password("hunter2");
        assert_ne!(first.as_str(), second.as_str());
    }

    #[rstest]
    #[case("")]
    #[case("not-a-hash")]
    #[case("10000$zz$zz")]
    #[case("abc$00$00")]
    fn malformed_storage_is_an_error(#[case] encoded: &str) {
        let stored = PasswordHash::from_storage(encoded.to_owned());
        assert_eq!(
            verify_password("anything", &stored),
            Err(CredentialError::MalformedHash)
        );
    }

    #[rstest]
    fn debug_output_is_redacted() {
        let stored = hash_password("hunter2");
        assert_eq!(format!("{stored:?}"), "PasswordHash(<redacted>)");
    }
}

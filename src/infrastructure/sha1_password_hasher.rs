use sha1::{Digest, Sha1};

use crate::domain::{
    error::DomainError,
    models::credential::{HashedPassword, Salt},
    services::password_service::PasswordHasher,
};

/// Length of a hex-encoded SHA-1 digest
pub const SHA1_HEX_LEN: usize = 40;

/// Single-pass SHA-1 over `plaintext || salt`, hex-encoded.
///
/// Matches credentials written by the previous user store. Fast digests are
/// weak against offline guessing; prefer [`Argon2PasswordHasher`] for new
/// deployments.
///
/// [`Argon2PasswordHasher`]: crate::infrastructure::argon2_password_hasher::Argon2PasswordHasher
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha1PasswordHasher;

impl Sha1PasswordHasher {
    pub fn new() -> Self {
        Self
    }

    /// The salt is mixed in as its text encoding, not as decoded bytes.
    pub fn digest(plaintext: &str, salt: &Salt) -> HashedPassword {
        let mut hasher = Sha1::new();
        hasher.update(plaintext.as_bytes());
        hasher.update(salt.as_str().as_bytes());
        HashedPassword::new(hex::encode(hasher.finalize()))
    }

    /// Whether `stored` has the shape of a legacy digest
    pub fn is_legacy_hash(stored: &HashedPassword) -> bool {
        let s = stored.as_str();
        s.len() == SHA1_HEX_LEN && s.bytes().all(|b| b.is_ascii_hexdigit())
    }
}

impl PasswordHasher for Sha1PasswordHasher {
    fn derive_password(&self, plaintext: &str, salt: &Salt) -> Result<HashedPassword, DomainError> {
        Ok(Self::digest(plaintext, salt))
    }
}

use base64::{Engine, engine::general_purpose::STANDARD};
use rand_core::{OsRng, TryRngCore};

use crate::domain::{
    error::DomainError,
    models::credential::{Credential, HashedPassword, Salt},
};

/// Number of random bytes in a freshly generated salt
pub const SALT_LEN: usize = 16;

/// Draw [`SALT_LEN`] bytes from the OS random source and base64-encode them.
pub fn generate_salt() -> Result<Salt, DomainError> {
    let mut bytes = [0u8; SALT_LEN];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| DomainError::EntropyUnavailable(e.to_string()))?;
    Ok(Salt::new(STANDARD.encode(bytes)))
}

/// Service for salting, hashing and verifying passwords
pub trait PasswordHasher: Clone + Send + Sync {
    /// Fresh random salt for a new or changed password
    fn generate_salt(&self) -> Result<Salt, DomainError> {
        generate_salt()
    }

    /// Deterministic digest of `plaintext` mixed with `salt`
    fn derive_password(&self, plaintext: &str, salt: &Salt) -> Result<HashedPassword, DomainError>;

    /// Check a candidate password against a stored hash.
    ///
    /// Any derivation failure counts as a mismatch.
    fn verify(&self, candidate: &str, salt: &Salt, stored: &HashedPassword) -> bool {
        match self.derive_password(candidate, salt) {
            Ok(derived) => derived.ct_matches(stored),
            Err(_) => false,
        }
    }

    /// Whether `stored` was produced by an older scheme than this hasher's
    fn needs_rehash(&self, _stored: &HashedPassword) -> bool {
        false
    }
}

/// A record whose password may have just been set by the caller
pub trait CredentialRecord {
    /// Plaintext set since the record was loaded, if any
    fn pending_password(&self) -> Option<&str>;

    /// Replace the stored salt and hash, discarding the plaintext
    fn set_credential(&mut self, credential: Credential);
}

/// Salt and hash the pending password of `record`, if there is one.
///
/// Called by the record store on every create and update path. Returns
/// `true` when a new credential was written into the record.
pub fn on_password_changed<P, R>(hasher: &P, record: &mut R) -> Result<bool, DomainError>
where
    P: PasswordHasher,
    R: CredentialRecord,
{
    let Some(plaintext) = record.pending_password() else {
        return Ok(false);
    };

    let salt = hasher.generate_salt()?;
    let hash = hasher.derive_password(plaintext, &salt)?;
    record.set_credential(Credential::new(salt, hash));

    Ok(true)
}

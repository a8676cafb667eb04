use argon2::{Argon2, Params};

use crate::{
    domain::{
        error::DomainError,
        models::credential::{HashedPassword, Salt},
        services::password_service::PasswordHasher,
    },
    infrastructure::sha1_password_hasher::Sha1PasswordHasher,
};

/// Tag prepended to every hash produced by this hasher
pub const ARGON2_PREFIX: &str = "argon2id$";

#[cfg(test)]
thread_local! {
    static DERIVATIONS: std::cell::Cell<usize> = const { std::cell::Cell::new(0) };
}

/// Argon2 derivations run on the current thread so far
#[cfg(test)]
pub(crate) fn derivation_count() -> usize {
    DERIVATIONS.with(|count| count.get())
}

#[derive(Debug, Clone)]
pub struct Argon2PasswordHasher {
    accept_legacy: bool,
}

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self {
            accept_legacy: false,
        }
    }

    /// Also accept SHA-1 hashes written by the previous store, flagging
    /// them through `needs_rehash`.
    pub fn with_legacy_support(accept_legacy: bool) -> Self {
        Self { accept_legacy }
    }

    pub fn accepts_legacy(&self) -> bool {
        self.accept_legacy
    }
}

impl Default for Argon2PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn derive_password(&self, plaintext: &str, salt: &Salt) -> Result<HashedPassword, DomainError> {
        #[cfg(test)]
        DERIVATIONS.with(|count| count.set(count.get() + 1));

        let mut output = [0u8; Params::DEFAULT_OUTPUT_LEN];

        Argon2::default()
            .hash_password_into(plaintext.as_bytes(), salt.as_str().as_bytes(), &mut output)
            .map_err(|e| DomainError::InvalidSalt(e.to_string()))?;

        Ok(HashedPassword::new(format!(
            "{}{}",
            ARGON2_PREFIX,
            hex::encode(output)
        )))
    }

    fn verify(&self, candidate: &str, salt: &Salt, stored: &HashedPassword) -> bool {
        // argon2 runs for every stored format, legacy rows included
        let derived = self.derive_password(candidate, salt);

        if self.accept_legacy && Sha1PasswordHasher::is_legacy_hash(stored) {
            return Sha1PasswordHasher::digest(candidate, salt).ct_matches(stored);
        }

        derived.is_ok_and(|derived| derived.ct_matches(stored))
    }

    fn needs_rehash(&self, stored: &HashedPassword) -> bool {
        !stored.as_str().starts_with(ARGON2_PREFIX)
    }
}

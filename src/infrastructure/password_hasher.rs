use crate::{
    config::{PasswordConfig, PasswordScheme},
    domain::{
        error::DomainError,
        models::credential::{HashedPassword, Salt},
        services::password_service::PasswordHasher,
    },
    infrastructure::{
        argon2_password_hasher::Argon2PasswordHasher, sha1_password_hasher::Sha1PasswordHasher,
    },
};

/// Hasher picked at startup from [`PasswordConfig`]
#[derive(Debug, Clone)]
pub enum ConfiguredPasswordHasher {
    Sha1(Sha1PasswordHasher),
    Argon2(Argon2PasswordHasher),
}

impl ConfiguredPasswordHasher {
    pub fn from_config(config: &PasswordConfig) -> Self {
        match config.scheme {
            PasswordScheme::Sha1 => Self::Sha1(Sha1PasswordHasher::new()),
            PasswordScheme::Argon2 => {
                Self::Argon2(Argon2PasswordHasher::with_legacy_support(config.accept_legacy))
            }
        }
    }

    pub fn scheme(&self) -> PasswordScheme {
        match self {
            Self::Sha1(_) => PasswordScheme::Sha1,
            Self::Argon2(_) => PasswordScheme::Argon2,
        }
    }
}

impl PasswordHasher for ConfiguredPasswordHasher {
    fn derive_password(&self, plaintext: &str, salt: &Salt) -> Result<HashedPassword, DomainError> {
        match self {
            Self::Sha1(h) => h.derive_password(plaintext, salt),
            Self::Argon2(h) => h.derive_password(plaintext, salt),
        }
    }

    fn verify(&self, candidate: &str, salt: &Salt, stored: &HashedPassword) -> bool {
        match self {
            Self::Sha1(h) => h.verify(candidate, salt, stored),
            Self::Argon2(h) => h.verify(candidate, salt, stored),
        }
    }

    fn needs_rehash(&self, stored: &HashedPassword) -> bool {
        match self {
            Self::Sha1(h) => h.needs_rehash(stored),
            Self::Argon2(h) => h.needs_rehash(stored),
        }
    }
}

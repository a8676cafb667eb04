use tracing::{debug, info, warn};

use crate::domain::{
    error::DomainError,
    models::{
        credential::{HashedPassword, Salt},
        user::{User, UserChanges},
    },
    repositories::user_repository::UserRepository,
    services::password_service::PasswordHasher,
};

pub struct LoginUsecase<R: UserRepository, P: PasswordHasher> {
    user_repository: R,
    password_hasher: P,
    rehash_on_login: bool,
}

impl<R: UserRepository, P: PasswordHasher> LoginUsecase<R, P> {
    pub fn new(user_repository: R, password_hasher: P) -> Self {
        Self {
            user_repository,
            password_hasher,
            rehash_on_login: true,
        }
    }

    /// Toggle upgrading outdated hashes after a successful login
    pub fn with_rehash_on_login(mut self, rehash_on_login: bool) -> Self {
        self.rehash_on_login = rehash_on_login;
        self
    }

    /// Authenticate `username` with `password`.
    ///
    /// Unknown users, users without a password and wrong passwords all
    /// return [`DomainError::AuthenticationFailed`].
    pub async fn login(&self, username: &str, password: &str) -> Result<User, DomainError> {
        let user = self.user_repository.find_by_username(username).await?;

        let Some((user, credential)) =
            user.and_then(|u| u.credential().cloned().map(|c| (u, c)))
        else {
            // dummy derivation for accounts without a credential
            let _ = self.password_hasher.verify(
                password,
                &Salt::new("AAAAAAAAAAAAAAAAAAAAAA==".to_string()),
                &HashedPassword::new(String::new()),
            );
            debug!("login rejected");
            return Err(DomainError::AuthenticationFailed);
        };

        if !self
            .password_hasher
            .verify(password, credential.salt(), credential.hash())
        {
            debug!(user_id = %user.id(), "login rejected");
            return Err(DomainError::AuthenticationFailed);
        }

        if self.rehash_on_login && self.password_hasher.needs_rehash(credential.hash()) {
            match self
                .user_repository
                .update(user.id(), UserChanges::new().with_password(password))
                .await
            {
                Ok(upgraded) => {
                    info!(user_id = %upgraded.id(), "password hash upgraded");
                    return Ok(upgraded);
                }
                Err(e) => warn!(user_id = %user.id(), error = %e, "password hash upgrade failed"),
            }
        }

        Ok(user)
    }
}

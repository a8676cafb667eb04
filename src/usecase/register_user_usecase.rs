use tracing::info;

use crate::domain::{
    error::DomainError,
    models::user::{NewUser, User},
    repositories::user_repository::UserRepository,
};

pub struct RegisterUserUsecase<R: UserRepository> {
    user_repository: R,
}

impl<R: UserRepository> RegisterUserUsecase<R> {
    pub fn new(user_repository: R) -> Self {
        Self { user_repository }
    }

    pub async fn create_user(
        &self,
        username: String,
        email: Option<String>,
        password: String,
    ) -> Result<User, DomainError> {
        if username.is_empty() {
            return Err(DomainError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(DomainError::WeakPassword);
        }

        let mut new_user = NewUser::new(username).with_password(password);
        if let Some(email) = email {
            new_user = new_user.with_email(email);
        }

        // salt and hash are derived inside the repository's create path
        let user = self.user_repository.create(new_user).await?;

        info!(user_id = %user.id(), "user registered");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use rstest::*;

    use super::*;
    use crate::{
        domain::services::password_service::PasswordHasher,
        infrastructure::sha1_password_hasher::Sha1PasswordHasher,
        usecase::mock::MockUserRepository,
    };

    #[fixture]
    fn usecase() -> RegisterUserUsecase<MockUserRepository<Sha1PasswordHasher>> {
        RegisterUserUsecase::new(MockUserRepository::new(Sha1PasswordHasher::new()))
    }

    #[rstest]
    #[tokio::test]
    async fn test_register_positive(usecase: RegisterUserUsecase<MockUserRepository<Sha1PasswordHasher>>) {
        let user = usecase
            .create_user(
                "new_user".to_string(),
                Some("test@example.com".to_string()),
                "new_password".to_string(),
            )
            .await
            .unwrap();

        assert_eq!(user.username(), "new_user");
        assert_eq!(user.email(), Some("test@example.com"));
        let credential = user.credential().unwrap();
        assert_ne!(credential.hash().as_str(), "new_password");
        assert!(Sha1PasswordHasher::new().verify("new_password", credential.salt(), credential.hash()));
    }

    #[rstest]
    #[case("", "new_password")]
    #[case("new_user", "")]
    #[tokio::test]
    async fn test_register_invalid_input_negative(
        usecase: RegisterUserUsecase<MockUserRepository<Sha1PasswordHasher>>,
        #[case] username: &str,
        #[case] password: &str,
    ) {
        let result = usecase
            .create_user(username.to_string(), None, password.to_string())
            .await;
        assert!(matches!(
            result,
            Err(DomainError::EmptyUsername | DomainError::WeakPassword)
        ));
    }
}

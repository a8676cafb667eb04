use crate::domain::{
    error::DomainError,
    models::user::{NewUser, User, UserChanges, UserId},
};
use async_trait::async_trait;

/// Persistence for user records.
///
/// Implementations must run `on_password_changed` on every `create` and
/// `update` before writing, so a plaintext password never reaches storage.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;
    async fn create(&self, new_user: NewUser) -> Result<User, DomainError>;
    async fn update(&self, id: &UserId, changes: UserChanges) -> Result<User, DomainError>;
    async fn delete(&self, id: &UserId) -> Result<(), DomainError>;
}

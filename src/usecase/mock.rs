use std::{collections::HashMap, sync::Mutex};

use async_trait::async_trait;

use crate::domain::{
    error::{DomainError, RepositoryError},
    models::user::{NewUser, User, UserChanges, UserId},
    repositories::user_repository::UserRepository,
    services::password_service::{PasswordHasher, on_password_changed},
};

/// In-memory user store honouring the same password hook as the sea-orm one
pub(crate) struct MockUserRepository<P: PasswordHasher> {
    hasher: P,
    users: Mutex<HashMap<UserId, User>>,
    pub(crate) updates: Mutex<Vec<UserId>>,
}

impl<P: PasswordHasher> MockUserRepository<P> {
    pub(crate) fn new(hasher: P) -> Self {
        Self {
            hasher,
            users: Mutex::new(HashMap::new()),
            updates: Mutex::new(Vec::new()),
        }
    }

    /// Insert a row as-is, bypassing the hook
    pub(crate) fn insert_raw(&self, user: User) {
        self.users.lock().unwrap().insert(*user.id(), user);
    }
}

#[async_trait]
impl<P: PasswordHasher + 'static> UserRepository for MockUserRepository<P> {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        Ok(self.users.lock().unwrap().get(id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.username() == username)
            .cloned())
    }

    async fn create(&self, mut new_user: NewUser) -> Result<User, DomainError> {
        if self
            .users
            .lock()
            .unwrap()
            .values()
            .any(|u| u.username() == new_user.username)
        {
            return Err(RepositoryError::Conflict(format!("username {}", new_user.username)).into());
        }
        on_password_changed(&self.hasher, &mut new_user)?;
        let credential = new_user.take_credential();
        let user = User::new(
            *UserId::new().as_uuid(),
            new_user.username,
            new_user.email,
            new_user.google_id,
            credential,
        )?;
        self.insert_raw(user.clone());
        Ok(user)
    }

    async fn update(&self, id: &UserId, mut changes: UserChanges) -> Result<User, DomainError> {
        on_password_changed(&self.hasher, &mut changes)?;
        let mut users = self.users.lock().unwrap();
        let current = users.get(id).cloned().ok_or(RepositoryError::NotFound)?;

        let credential = changes
            .take_credential()
            .or_else(|| current.credential().cloned());
        let user = User::new(
            *id.as_uuid(),
            changes.username.unwrap_or_else(|| current.username().to_string()),
            changes
                .email
                .unwrap_or_else(|| current.email().map(str::to_string)),
            changes
                .google_id
                .unwrap_or_else(|| current.google_id().map(str::to_string)),
            credential,
        )?;
        users.insert(*id, user.clone());
        self.updates.lock().unwrap().push(*id);
        Ok(user)
    }

    async fn delete(&self, id: &UserId) -> Result<(), DomainError> {
        self.users
            .lock()
            .unwrap()
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| RepositoryError::NotFound.into())
    }
}

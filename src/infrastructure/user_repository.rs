use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, SqlErr,
};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    domain::{
        error::{DomainError, RepositoryError},
        models::{
            credential::Credential,
            user::{NewUser, User, UserChanges, UserId},
        },
        repositories::user_repository::UserRepository,
        services::password_service::{PasswordHasher, on_password_changed},
    },
    entity::users,
};

#[derive(Clone)]
pub struct SeaOrmUserRepository<P: PasswordHasher> {
    db: DatabaseConnection,
    hasher: P,
}

impl<P: PasswordHasher> SeaOrmUserRepository<P> {
    pub fn new(db: DatabaseConnection, hasher: P) -> Self {
        Self { db, hasher }
    }

    pub fn hasher(&self) -> &P {
        &self.hasher
    }

    async fn find_model(&self, id: Uuid) -> Result<Option<users::Model>, DomainError> {
        users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| map_db_error(e).into())
    }
}

fn map_db_error(err: DbErr) -> RepositoryError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => RepositoryError::Conflict(detail),
        _ => RepositoryError::DatabaseError(err.to_string()),
    }
}

fn to_domain(model: users::Model) -> Result<User, DomainError> {
    let credential = Credential::reconstruct(model.salt, model.password_hash);
    User::new(model.id, model.username, model.email, model.google_id, credential)
}

fn set_credential(active: &mut users::ActiveModel, credential: Credential) {
    let (salt, hash) = credential.into_parts();
    active.salt = Set(Some(salt.into_inner()));
    active.password_hash = Set(Some(hash.into_inner()));
}

#[async_trait]
impl<P: PasswordHasher + 'static> UserRepository for SeaOrmUserRepository<P> {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        self.find_model(*id.as_uuid())
            .await?
            .map(to_domain)
            .transpose()
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(map_db_error)?
            .map(to_domain)
            .transpose()
    }

    async fn create(&self, mut new_user: NewUser) -> Result<User, DomainError> {
        if new_user.username.is_empty() {
            return Err(DomainError::EmptyUsername);
        }

        on_password_changed(&self.hasher, &mut new_user)?;

        let id = UserId::new();
        let now = Utc::now();
        let credential = new_user.take_credential();
        let mut active = users::ActiveModel {
            id: Set(*id.as_uuid()),
            google_id: Set(new_user.google_id),
            username: Set(new_user.username),
            email: Set(new_user.email),
            password_hash: Set(None),
            salt: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };
        if let Some(credential) = credential {
            set_credential(&mut active, credential);
        }

        let model = active.insert(&self.db).await.map_err(|e| {
            let err = map_db_error(e);
            warn!(error = %err, "failed to create user");
            err
        })?;

        info!(user_id = %model.id, "user created");
        to_domain(model)
    }

    async fn update(&self, id: &UserId, mut changes: UserChanges) -> Result<User, DomainError> {
        let model = self
            .find_model(*id.as_uuid())
            .await?
            .ok_or(RepositoryError::NotFound)?;

        if changes.is_empty() {
            return to_domain(model);
        }

        let rehashed = on_password_changed(&self.hasher, &mut changes)?;

        let mut active: users::ActiveModel = model.into();
        if let Some(username) = changes.username.take() {
            if username.is_empty() {
                return Err(DomainError::EmptyUsername);
            }
            active.username = Set(username);
        }
        if let Some(email) = changes.email.take() {
            active.email = Set(email);
        }
        if let Some(google_id) = changes.google_id.take() {
            active.google_id = Set(google_id);
        }
        if let Some(credential) = changes.take_credential() {
            set_credential(&mut active, credential);
        }
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await.map_err(map_db_error)?;

        debug!(user_id = %model.id, rehashed, "user updated");
        to_domain(model)
    }

    async fn delete(&self, id: &UserId) -> Result<(), DomainError> {
        let result = users::Entity::delete_by_id(*id.as_uuid())
            .exec(&self.db)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound.into());
        }

        info!(user_id = %id, "user deleted");
        Ok(())
    }
}

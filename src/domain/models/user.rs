use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    error::DomainError,
    models::credential::Credential,
    services::password_service::CredentialRecord,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(Uuid);
impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password waiting to be salted and hashed
#[derive(Clone, PartialEq, Eq)]
pub struct PlaintextPassword(String);

impl PlaintextPassword {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PlaintextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PlaintextPassword(..)")
    }
}

#[derive(Debug, Clone)]
pub struct User {
    id: UserId,
    username: String,
    email: Option<String>,
    google_id: Option<String>,
    credential: Option<Credential>,
}

impl User {
    pub fn new(
        id: Uuid,
        username: String,
        email: Option<String>,
        google_id: Option<String>,
        credential: Option<Credential>,
    ) -> Result<Self, DomainError> {
        if username.is_empty() {
            return Err(DomainError::EmptyUsername);
        }

        Ok(Self {
            id: UserId(id),
            username,
            email,
            google_id,
            credential,
        })
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }
    pub fn username(&self) -> &str {
        &self.username
    }
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }
    pub fn google_id(&self) -> Option<&str> {
        self.google_id.as_deref()
    }
    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    /// Externally visible view of the user, without salt or hash
    pub fn sanitize(&self) -> PublicUser {
        PublicUser::from(self)
    }
}

/// json representation handed to anything outside the record store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_id: Option<String>,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            email: user.email.clone(),
            google_id: user.google_id.clone(),
        }
    }
}

/// Fields of a user about to be created
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub username: String,
    pub email: Option<String>,
    pub google_id: Option<String>,
    password: Option<PlaintextPassword>,
    credential: Option<Credential>,
}

impl NewUser {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..Self::default()
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_google_id(mut self, google_id: impl Into<String>) -> Self {
        self.google_id = Some(google_id.into());
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(PlaintextPassword::new(password));
        self
    }

    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    pub fn take_credential(&mut self) -> Option<Credential> {
        self.credential.take()
    }
}

impl CredentialRecord for NewUser {
    fn pending_password(&self) -> Option<&str> {
        self.password.as_ref().map(PlaintextPassword::as_str)
    }

    fn set_credential(&mut self, credential: Credential) {
        self.password = None;
        self.credential = Some(credential);
    }
}

/// Change set for an existing user. Only fields set here are written.
///
/// `email` and `google_id` are doubly optional: `Some(None)` clears the
/// column, `None` leaves it alone.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub username: Option<String>,
    pub email: Option<Option<String>>,
    pub google_id: Option<Option<String>>,
    password: Option<PlaintextPassword>,
    credential: Option<Credential>,
}

impl UserChanges {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_email(mut self, email: Option<String>) -> Self {
        self.email = Some(email);
        self
    }

    pub fn with_google_id(mut self, google_id: Option<String>) -> Self {
        self.google_id = Some(google_id);
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(PlaintextPassword::new(password));
        self
    }

    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    pub fn take_credential(&mut self) -> Option<Credential> {
        self.credential.take()
    }

    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.email.is_none()
            && self.google_id.is_none()
            && self.password.is_none()
            && self.credential.is_none()
    }
}

impl CredentialRecord for UserChanges {
    fn pending_password(&self) -> Option<&str> {
        self.password.as_ref().map(PlaintextPassword::as_str)
    }

    fn set_credential(&mut self, credential: Credential) {
        self.password = None;
        self.credential = Some(credential);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::credential::{HashedPassword, Salt};

    fn user_with_credential() -> User {
        let credential = Credential::new(
            Salt::new("c2FsdHNhbHRzYWx0c2FsdA==".to_string()),
            HashedPassword::new("0123456789abcdef0123456789abcdef01234567".to_string()),
        );
        User::new(
            Uuid::new_v4(),
            "alice".to_string(),
            Some("alice@example.com".to_string()),
            None,
            Some(credential),
        )
        .unwrap()
    }

    #[test]
    fn test_empty_username_negative() {
        let result = User::new(Uuid::new_v4(), String::new(), None, None, None);
        assert!(matches!(result, Err(DomainError::EmptyUsername)));
    }

    #[test]
    fn test_sanitize_omits_salt_and_hash() {
        let user = user_with_credential();
        let json = serde_json::to_value(user.sanitize()).unwrap();
        let object = json.as_object().unwrap();

        assert_eq!(object["username"], "alice");
        assert_eq!(object["email"], "alice@example.com");
        assert!(!object.contains_key("google_id"));
        assert!(!object.contains_key("salt"));
        assert!(!object.contains_key("password"));
        assert!(!object.contains_key("password_hash"));

        let rendered = json.to_string();
        assert!(!rendered.contains("c2FsdHNhbHRzYWx0c2FsdA=="));
        assert!(!rendered.contains("0123456789abcdef"));
    }

    #[test]
    fn test_pending_password_cleared_once_credential_is_set() {
        let mut changes = UserChanges::new().with_password("hunter2");
        assert_eq!(changes.pending_password(), Some("hunter2"));

        changes.set_credential(Credential::new(
            Salt::new("salt".to_string()),
            HashedPassword::new("hash".to_string()),
        ));
        assert_eq!(changes.pending_password(), None);
        assert!(changes.credential().is_some());
    }

    #[test]
    fn test_debug_never_prints_plaintext() {
        let new_user = NewUser::new("bob").with_password("hunter2");
        assert!(!format!("{new_user:?}").contains("hunter2"));
    }
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Authentication failed")]
    AuthenticationFailed,

    #[error("Weak password (must not be empty)")]
    WeakPassword,

    #[error("Empty username")]
    EmptyUsername,

    #[error("Secure random source unavailable: {0}")]
    EntropyUnavailable(String),

    #[error("Invalid salt: {0}")]
    InvalidSalt(String),
}

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Not found")]
    NotFound,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

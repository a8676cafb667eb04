pub mod argon2_password_hasher;
pub mod database;
pub mod password_hasher;
pub mod sha1_password_hasher;
pub mod user_repository;

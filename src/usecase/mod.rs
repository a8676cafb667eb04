pub mod login_usecase;
pub mod register_user_usecase;

#[cfg(test)]
pub(crate) mod mock;

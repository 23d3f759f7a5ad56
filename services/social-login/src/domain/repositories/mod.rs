mod access_token_repository;
mod user_repository;

pub use access_token_repository::*;
pub use user_repository::*;

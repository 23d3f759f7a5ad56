//! PostgreSQL 持久化实现
//!
//! `access_tokens` 与 `users` 两张表由外部令牌存储和用户库维护，这里只读。

mod postgres_access_token_repository;
mod postgres_user_repository;

pub use postgres_access_token_repository::*;
pub use postgres_user_repository::*;

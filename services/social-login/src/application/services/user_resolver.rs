//! 会话令牌解析为用户

use std::sync::Arc;

use metrics::counter;
use social_errors::{AppError, AppResult};
use tracing::{debug, warn};

use crate::domain::entities::User;
use crate::domain::repositories::{AccessTokenRepository, UserRepository};

/// 根据会话令牌查找用户
///
/// 两次查询（令牌记录 -> 用户记录）之间没有事务保证。用户在两次读取之间被删除时
/// 返回 `DanglingReference`，调用方按认证失败处理。
pub struct UserResolver {
    token_repo: Arc<dyn AccessTokenRepository>,
    user_repo: Arc<dyn UserRepository>,
}

impl UserResolver {
    pub fn new(
        token_repo: Arc<dyn AccessTokenRepository>,
        user_repo: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            token_repo,
            user_repo,
        }
    }

    pub async fn resolve(&self, session_token: &str) -> AppResult<User> {
        if session_token.is_empty() {
            counter!("social_login_user_resolve_total", "outcome" => "not_found").increment(1);
            return Err(AppError::not_found("Access token not found"));
        }

        let record = match self.token_repo.find_by_token(session_token).await? {
            Some(record) => record,
            None => {
                counter!("social_login_user_resolve_total", "outcome" => "not_found").increment(1);
                return Err(AppError::not_found("Access token not found"));
            }
        };

        debug!(expired = record.is_expired(), "Access token record found");

        let user_id = match record.user_id {
            Some(user_id) => user_id,
            None => {
                counter!("social_login_user_resolve_total", "outcome" => "not_found").increment(1);
                return Err(AppError::not_found("Access token has no associated user"));
            }
        };

        match self.user_repo.find_by_id(&user_id).await? {
            Some(user) => {
                counter!("social_login_user_resolve_total", "outcome" => "success").increment(1);
                Ok(user)
            }
            None => {
                counter!("social_login_user_resolve_total", "outcome" => "dangling").increment(1);
                warn!(user_id = %user_id, "Access token references a missing user");
                Err(AppError::dangling_reference(format!(
                    "User {} referenced by access token not found",
                    user_id
                )))
            }
        }
    }
}

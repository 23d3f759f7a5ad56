//! Access Token 仓储接口

use async_trait::async_trait;
use social_errors::AppResult;

use crate::domain::entities::AccessToken;

/// Access Token 仓储接口
#[async_trait]
pub trait AccessTokenRepository: Send + Sync {
    /// 根据 Token 精确查找
    async fn find_by_token(&self, token: &str) -> AppResult<Option<AccessToken>>;
}

//! 用户 Repository trait

use async_trait::async_trait;
use social_common::UserId;
use social_errors::AppResult;

use crate::domain::entities::User;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// 根据 ID 查找用户
    async fn find_by_id(&self, id: &UserId) -> AppResult<Option<User>>;
}

//! Access Token 实体
//!
//! 会话令牌记录由外部令牌存储子系统创建和维护，这里只读取。

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use social_common::UserId;

/// 已存储的会话令牌记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
    /// Token 字符串
    pub token: String,
    /// 用户 ID（Client Credentials 流程签发的令牌可能为 None）
    pub user_id: Option<UserId>,
    /// 过期时间
    pub expires_at: DateTime<Utc>,
    /// 创建时间
    pub created_at: DateTime<Utc>,
}

impl AccessToken {
    pub fn new(token: impl Into<String>, user_id: Option<UserId>, lifetime_seconds: i64) -> Self {
        let now = Utc::now();
        Self {
            token: token.into(),
            user_id,
            expires_at: now + Duration::seconds(lifetime_seconds),
            created_at: now,
        }
    }

    /// 检查是否过期
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_access_token() {
        let user_id = UserId::new();
        let token = AccessToken::new("sess1", Some(user_id.clone()), 3600);

        assert_eq!(token.token, "sess1");
        assert_eq!(token.user_id, Some(user_id));
        assert!(!token.is_expired());
    }

    #[test]
    fn test_expired_token() {
        let token = AccessToken::new("sess1", None, -10);
        assert!(token.is_expired());
    }
}

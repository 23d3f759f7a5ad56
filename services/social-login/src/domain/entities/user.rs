//! 用户实体

use serde::{Deserialize, Serialize};
use social_common::{AuditInfo, UserId};

/// 用户记录（由外部用户库维护，只解析不修改）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub is_active: bool,
    pub audit_info: AuditInfo,
}

impl User {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            id: UserId::new(),
            username: username.into(),
            email: None,
            display_name: None,
            avatar_url: None,
            is_active: true,
            audit_info: AuditInfo::default(),
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

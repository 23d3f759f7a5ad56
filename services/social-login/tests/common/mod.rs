//! 测试共用的内存仓储与配置

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use secrecy::Secret;
use social_common::UserId;
use social_config::{ConvertTokenConfig, GithubConfig};
use social_errors::AppResult;
use social_login::application::services::UserResolver;
use social_login::domain::entities::{AccessToken, User};
use social_login::domain::repositories::{AccessTokenRepository, UserRepository};

pub const GITHUB_TOKEN_PATH: &str = "/login/oauth/access_token/";
pub const CONVERT_TOKEN_PATH: &str = "/auth/convert-token/";

#[derive(Default)]
pub struct InMemoryAccessTokenRepository {
    tokens: RwLock<HashMap<String, AccessToken>>,
}

impl InMemoryAccessTokenRepository {
    pub fn insert(&self, token: AccessToken) {
        self.tokens
            .write()
            .unwrap()
            .insert(token.token.clone(), token);
    }
}

#[async_trait]
impl AccessTokenRepository for InMemoryAccessTokenRepository {
    async fn find_by_token(&self, token: &str) -> AppResult<Option<AccessToken>> {
        Ok(self.tokens.read().unwrap().get(token).cloned())
    }
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn insert(&self, user: User) {
        self.users.write().unwrap().insert(user.id.clone(), user);
    }

    pub fn remove(&self, id: &UserId) {
        self.users.write().unwrap().remove(id);
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &UserId) -> AppResult<Option<User>> {
        Ok(self.users.read().unwrap().get(id).cloned())
    }
}

/// 内存仓储 + 解析器
pub struct Fixture {
    pub tokens: Arc<InMemoryAccessTokenRepository>,
    pub users: Arc<InMemoryUserRepository>,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            tokens: Arc::new(InMemoryAccessTokenRepository::default()),
            users: Arc::new(InMemoryUserRepository::default()),
        }
    }

    /// 创建用户并为其登记会话令牌
    pub fn user_with_session(&self, username: &str, session_token: &str) -> User {
        let user = User::new(username).with_email(format!("{}@example.com", username));
        self.users.insert(user.clone());
        self.tokens
            .insert(AccessToken::new(session_token, Some(user.id.clone()), 36000));
        user
    }

    pub fn resolver(&self) -> UserResolver {
        UserResolver::new(self.tokens.clone(), self.users.clone())
    }
}

pub fn github_config(server_uri: &str) -> GithubConfig {
    GithubConfig {
        client_id: "gh-client".to_string(),
        client_secret: Secret::new("gh-secret".to_string()),
        token_url: format!("{}{}", server_uri, GITHUB_TOKEN_PATH),
    }
}

pub fn convert_token_config(server_uri: &str) -> ConvertTokenConfig {
    ConvertTokenConfig {
        base_url: format!("{}/", server_uri),
        client_id: "local-client".to_string(),
        client_secret: Secret::new("local-secret".to_string()),
        backend: "github".to_string(),
    }
}

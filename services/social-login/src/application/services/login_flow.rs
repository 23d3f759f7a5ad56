//! GitHub 登录流程：授权码 -> GitHub Access Token -> 会话令牌 -> 用户

use secrecy::ExposeSecret;
use serde::Serialize;
use social_config::{ConvertTokenConfig, GithubConfig};
use social_errors::AppResult;
use tracing::info;

use super::{CodeExchanger, TokenConverter, UserResolver};
use crate::domain::entities::User;

/// 登录结果
#[derive(Debug, Clone, Serialize)]
pub struct LoginOutcome {
    pub session_token: String,
    pub user: User,
}

/// 串联三个无状态步骤，任一步失败直接返回该错误
pub struct LoginFlow {
    exchanger: CodeExchanger,
    converter: TokenConverter,
    resolver: UserResolver,
    github: GithubConfig,
    convert_token: ConvertTokenConfig,
}

impl LoginFlow {
    pub fn new(
        http: reqwest::Client,
        github: GithubConfig,
        convert_token: ConvertTokenConfig,
        resolver: UserResolver,
    ) -> Self {
        Self {
            exchanger: CodeExchanger::new(http.clone()).with_token_url(github.token_url.clone()),
            converter: TokenConverter::new(http),
            resolver,
            github,
            convert_token,
        }
    }

    pub fn resolver(&self) -> &UserResolver {
        &self.resolver
    }

    pub async fn login(&self, code: &str) -> AppResult<LoginOutcome> {
        let provider_token = self
            .exchanger
            .exchange(
                &self.github.client_id,
                self.github.client_secret.expose_secret(),
                code,
            )
            .await?;

        let session_token = self
            .converter
            .convert(
                &self.convert_token.base_url,
                &self.convert_token.client_id,
                self.convert_token.client_secret.expose_secret(),
                &self.convert_token.backend,
                &provider_token,
            )
            .await?;

        let user = self.resolver.resolve(&session_token).await?;

        info!(user_id = %user.id, backend = %self.convert_token.backend, "User logged in");

        Ok(LoginOutcome {
            session_token,
            user,
        })
    }
}

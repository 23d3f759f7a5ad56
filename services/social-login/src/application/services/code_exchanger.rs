//! GitHub 授权码换取 Access Token

use metrics::counter;
use serde::Serialize;
use social_config::DEFAULT_GITHUB_TOKEN_URL;
use social_errors::{AppError, AppResult};
use tracing::{debug, info, warn};
use url::form_urlencoded;

const ACCESS_TOKEN_MARKER: &str = "access_token=";

#[derive(Debug, Serialize)]
struct CodeExchangeRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    code: &'a str,
}

/// 用一次性授权码向 GitHub 换取 Access Token
#[derive(Debug, Clone)]
pub struct CodeExchanger {
    http: reqwest::Client,
    token_url: String,
}

impl CodeExchanger {
    pub fn new(http: reqwest::Client) -> Self {
        Self {
            http,
            token_url: DEFAULT_GITHUB_TOKEN_URL.to_string(),
        }
    }

    pub fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = token_url.into();
        self
    }

    pub fn token_url(&self) -> &str {
        &self.token_url
    }

    /// 交换授权码
    ///
    /// 响应体中找不到 `access_token` 时返回 `Unauthorized`，错误中携带原始响应体。
    /// 网络错误返回 `Transport`，不重试。
    pub async fn exchange(
        &self,
        client_id: &str,
        client_secret: &str,
        code: &str,
    ) -> AppResult<String> {
        debug!(token_url = %self.token_url, "Exchanging authorization code");

        let response = self
            .http
            .post(&self.token_url)
            .json(&CodeExchangeRequest {
                client_id,
                client_secret,
                code,
            })
            .send()
            .await
            .map_err(|e| {
                counter!("social_login_code_exchange_total", "outcome" => "transport_error")
                    .increment(1);
                AppError::transport(format!("GitHub token request failed: {}", e))
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            counter!("social_login_code_exchange_total", "outcome" => "transport_error")
                .increment(1);
            AppError::transport(format!("Failed to read GitHub token response: {}", e))
        })?;

        match extract_access_token(&body) {
            Some(token) => {
                counter!("social_login_code_exchange_total", "outcome" => "success").increment(1);
                info!("Authorization code exchanged");
                Ok(token)
            }
            None => {
                counter!("social_login_code_exchange_total", "outcome" => "rejected").increment(1);
                let (error, description) = provider_error(&body);
                warn!(
                    status = %status,
                    error = error.as_deref().unwrap_or("none"),
                    description = description.as_deref().unwrap_or("none"),
                    "GitHub rejected authorization code"
                );
                Err(AppError::unauthorized(body))
            }
        }
    }
}

/// 从 GitHub 令牌响应中提取 `access_token`
///
/// 以文本中第一个带非空值的 `access_token=` 标记为准，值读到下一个分隔符为止，
/// 再只对这一段做 `application/x-www-form-urlencoded` 解码。
pub fn extract_access_token(body: &str) -> Option<String> {
    body.match_indices(ACCESS_TOKEN_MARKER)
        .filter_map(|(idx, _)| {
            let rest = &body[idx + ACCESS_TOKEN_MARKER.len()..];
            let raw = rest
                .split(|c: char| {
                    c.is_whitespace() || matches!(c, '&' | '"' | '\'' | ',' | ';' | '<' | '>')
                })
                .next()
                .unwrap_or_default();
            decode_value(raw).filter(|value| !value.is_empty())
        })
        .next()
}

fn decode_value(raw: &str) -> Option<String> {
    form_urlencoded::parse(format!("v={}", raw).as_bytes())
        .next()
        .map(|(_, value)| value.into_owned())
}

fn provider_error(body: &str) -> (Option<String>, Option<String>) {
    let mut error = None;
    let mut description = None;
    for (key, value) in form_urlencoded::parse(body.trim().as_bytes()) {
        match &*key {
            "error" if error.is_none() => error = Some(value.into_owned()),
            "error_description" if description.is_none() => {
                description = Some(value.into_owned())
            }
            _ => {}
        }
    }
    (error, description)
}

//! 第三方 Access Token 转换为本地会话令牌

use metrics::counter;
use serde::{Deserialize, Serialize};
use social_errors::{AppError, AppResult};
use tracing::{debug, info, warn};

const CONVERT_TOKEN_PATH: &str = "auth/convert-token/";
const CONVERT_GRANT_TYPE: &str = "convert_token";

#[derive(Debug, Serialize)]
struct ConvertTokenForm<'a> {
    grant_type: &'static str,
    client_id: &'a str,
    client_secret: &'a str,
    backend: &'a str,
    token: &'a str,
}

#[derive(Debug, Deserialize)]
struct ConvertTokenResponse {
    access_token: String,
}

/// 调用 `convert-token` 端点，把身份提供方的 Access Token 换成本地会话令牌
#[derive(Debug, Clone)]
pub struct TokenConverter {
    http: reqwest::Client,
}

impl TokenConverter {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// 转换令牌
    ///
    /// 响应不是合法 JSON 或缺少 `access_token` 字段时返回 `MissingField`。
    pub async fn convert(
        &self,
        base_url: &str,
        client_id: &str,
        client_secret: &str,
        backend: &str,
        token: &str,
    ) -> AppResult<String> {
        let endpoint = convert_token_url(base_url);
        debug!(endpoint = %endpoint, backend, "Converting provider token");

        let response = self
            .http
            .post(&endpoint)
            .form(&ConvertTokenForm {
                grant_type: CONVERT_GRANT_TYPE,
                client_id,
                client_secret,
                backend,
                token,
            })
            .send()
            .await
            .map_err(|e| {
                counter!("social_login_token_convert_total", "outcome" => "transport_error")
                    .increment(1);
                AppError::transport(format!("Token conversion request failed: {}", e))
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            counter!("social_login_token_convert_total", "outcome" => "transport_error")
                .increment(1);
            AppError::transport(format!("Failed to read token conversion response: {}", e))
        })?;

        match parse_session_token(&body) {
            Ok(session_token) => {
                counter!("social_login_token_convert_total", "outcome" => "success").increment(1);
                info!(backend, "Provider token converted");
                Ok(session_token)
            }
            Err(e) => {
                counter!("social_login_token_convert_total", "outcome" => "missing_field")
                    .increment(1);
                warn!(status = %status, backend, error = %e, "Token conversion response unusable");
                Err(e)
            }
        }
    }
}

/// 拼接转换端点地址，`base_url` 缺少结尾 `/` 时补上
pub fn convert_token_url(base_url: &str) -> String {
    if base_url.ends_with('/') {
        format!("{}{}", base_url, CONVERT_TOKEN_PATH)
    } else {
        format!("{}/{}", base_url, CONVERT_TOKEN_PATH)
    }
}

fn parse_session_token(body: &str) -> AppResult<String> {
    serde_json::from_str::<ConvertTokenResponse>(body)
        .ok()
        .map(|r| r.access_token)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AppError::missing_field("access_token"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_token_url() {
        assert_eq!(
            convert_token_url("http://localhost:8000/"),
            "http://localhost:8000/auth/convert-token/"
        );
        assert_eq!(
            convert_token_url("http://localhost:8000"),
            "http://localhost:8000/auth/convert-token/"
        );
        assert_eq!(
            convert_token_url("https://api.example.com/v1/"),
            "https://api.example.com/v1/auth/convert-token/"
        );
    }

    #[test]
    fn test_parse_session_token() {
        assert_eq!(
            parse_session_token(r#"{"access_token":"T","token_type":"Bearer","expires_in":36000}"#)
                .unwrap(),
            "T"
        );
    }

    #[test]
    fn test_parse_rejects_unusable_bodies() {
        for body in [
            r#"{"error":"invalid_client"}"#,
            r#"{"access_token":""}"#,
            r#"{"access_token":42}"#,
            "<html>502 Bad Gateway</html>",
            "",
        ] {
            let err = parse_session_token(body).unwrap_err();
            assert!(
                matches!(err, AppError::MissingField(ref field) if field == "access_token"),
                "unexpected error for {:?}: {}",
                body,
                err
            );
        }
    }
}

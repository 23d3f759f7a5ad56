//! social-errors - 统一错误处理
//!
//! 基于 RFC 7807 Problem Details 规范

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 应用错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 身份提供方拒绝了授权码，或返回了无法解析的响应（携带原始响应体）
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// 上游响应缺少期望字段
    #[error("Missing field: {0}")]
    MissingField(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// 记录存在但其引用的实体已不存在
    #[error("Dangling reference: {0}")]
    DanglingReference(String),

    /// 网络调用失败（DNS、连接拒绝、超时）
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField(field.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn dangling_reference(msg: impl Into<String>) -> Self {
        Self::DanglingReference(msg.into())
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// 是否属于认证失败（调用方应统一映射为用户可见的登录失败）
    pub fn is_authentication_failure(&self) -> bool {
        matches!(
            self,
            Self::Unauthorized(_)
                | Self::MissingField(_)
                | Self::NotFound(_)
                | Self::DanglingReference(_)
        )
    }

    /// 转换为 HTTP 状态码
    ///
    /// 认证类失败一律 401，HTTP 层直接使用这里的映射。
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Unauthorized(_) => 401,
            Self::MissingField(_) => 401,
            Self::NotFound(_) => 401,
            Self::DanglingReference(_) => 401,
            Self::Transport(_) => 502,
            Self::Validation(_) => 400,
            Self::Database(_) => 500,
            Self::Internal(_) => 500,
        }
    }

    /// 转换为 Problem Details
    pub fn to_problem_details(&self) -> ProblemDetails {
        ProblemDetails {
            r#type: self.problem_type(),
            title: self.problem_title(),
            status: self.status_code(),
            detail: self.to_string(),
            instance: None,
        }
    }

    fn problem_slug(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "unauthorized",
            Self::MissingField(_) => "missing-field",
            Self::NotFound(_) => "not-found",
            Self::DanglingReference(_) => "dangling-reference",
            Self::Transport(_) => "transport",
            Self::Validation(_) => "validation",
            Self::Database(_) => "database",
            Self::Internal(_) => "internal",
        }
    }

    fn problem_type(&self) -> String {
        format!("https://social-login.dev/problems/{}", self.problem_slug())
    }

    pub fn problem_title(&self) -> String {
        match self {
            Self::Unauthorized(_) => "Unauthorized".to_string(),
            Self::MissingField(_) => "Missing Field".to_string(),
            Self::NotFound(_) => "Resource Not Found".to_string(),
            Self::DanglingReference(_) => "Dangling Reference".to_string(),
            Self::Transport(_) => "Transport Error".to_string(),
            Self::Validation(_) => "Validation Error".to_string(),
            Self::Database(_) => "Database Error".to_string(),
            Self::Internal(_) => "Internal Server Error".to_string(),
        }
    }
}

/// RFC 7807 Problem Details
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemDetails {
    pub r#type: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
}

/// Result 类型别名
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_keeps_raw_body() {
        let err = AppError::unauthorized("error=bad_verification_code");
        assert_eq!(err.to_string(), "Unauthorized: error=bad_verification_code");
        assert_eq!(err.status_code(), 401);
    }

    #[test]
    fn test_authentication_failures_map_to_401() {
        for err in [
            AppError::unauthorized("raw"),
            AppError::missing_field("access_token"),
            AppError::not_found("token"),
            AppError::dangling_reference("user"),
        ] {
            assert_eq!(err.status_code(), 401, "{}", err);
        }
        assert_eq!(AppError::transport("refused").status_code(), 502);
        assert_eq!(AppError::validation("code is required").status_code(), 400);
        assert_eq!(AppError::database("pool closed").status_code(), 500);
    }

    #[test]
    fn test_authentication_failures() {
        assert!(AppError::missing_field("access_token").is_authentication_failure());
        assert!(AppError::not_found("token").is_authentication_failure());
        assert!(AppError::dangling_reference("user").is_authentication_failure());
        assert!(!AppError::transport("connection refused").is_authentication_failure());
        assert!(!AppError::database("pool closed").is_authentication_failure());
    }

    #[test]
    fn test_problem_details_serialization() {
        let problem = AppError::dangling_reference("user gone").to_problem_details();
        assert_eq!(problem.status, 401);
        assert_eq!(problem.title, "Dangling Reference");

        let json = serde_json::to_value(&problem).unwrap();
        assert_eq!(
            json["type"],
            "https://social-login.dev/problems/dangling-reference"
        );
        assert!(json.get("instance").is_none());
    }
}

//! 认证路由

use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use serde::{Deserialize, Serialize};
use social_adapter_postgres::check_connection;
use social_errors::AppError;
use social_telemetry::HealthStatus;

use super::{ApiError, AppState};
use crate::domain::entities::User;

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/auth/github/callback", get(github_callback))
        .route("/auth/me", get(current_user))
        .route("/health", get(health))
        .route("/metrics", get(render_metrics))
        .with_state(state)
}

/// GitHub OAuth 回调参数
///
/// 用户拒绝授权时 GitHub 回调携带 `error` 而不是 `code`。
#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub user: User,
}

async fn github_callback(
    State(state): State<AppState>,
    Query(params): Query<CallbackParams>,
) -> Result<Json<LoginResponse>, ApiError> {
    if let Some(error) = params.error {
        return Err(AppError::unauthorized(format!(
            "{}: {}",
            error,
            params.error_description.unwrap_or_default()
        ))
        .into());
    }

    let code = params
        .code
        .filter(|code| !code.is_empty())
        .ok_or_else(|| AppError::validation("code is required"))?;

    let outcome = state.login_flow.login(&code).await?;

    Ok(Json(LoginResponse {
        access_token: outcome.session_token,
        token_type: "Bearer".to_string(),
        user: outcome.user,
    }))
}

async fn current_user(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<User>, ApiError> {
    let token = bearer_token(&headers)
        .ok_or_else(|| AppError::unauthorized("Missing bearer token"))?;

    let user = state.login_flow.resolver().resolve(token).await?;

    Ok(Json(user))
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let mut status = HealthStatus::new();
    match check_connection(&state.pool).await {
        Ok(()) => status.add_check("database", true, None),
        Err(e) => status.add_check("database", false, Some(e.to_string())),
    }

    let code = if status.healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (code, Json(status))
}

async fn render_metrics(State(state): State<AppState>) -> String {
    state.metrics.render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_bearer_token() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer sess1"));
        assert_eq!(bearer_token(&headers), Some("sess1"));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic dXNlcg=="));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(bearer_token(&headers), None);
    }
}

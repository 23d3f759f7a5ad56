use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use social_errors::{AppError, ProblemDetails};
use tracing::{error, warn};

/// HTTP 层错误
///
/// 状态码取自 `AppError::status_code`；认证类失败不向客户端回显身份提供方的原始响应。
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl ApiError {
    fn to_problem(&self) -> ProblemDetails {
        let err = &self.0;
        if err.is_authentication_failure() {
            warn!(error = %err, "Authentication failed");
            return AppError::unauthorized("Authentication failed").to_problem_details();
        }

        match err {
            AppError::Validation(_) => err.to_problem_details(),
            AppError::Transport(_) => {
                error!(error = %err, "Upstream call failed");
                let mut problem = err.to_problem_details();
                problem.detail = "Upstream service unavailable".to_string();
                problem
            }
            _ => {
                error!(error = %err, "Request failed");
                let mut problem = err.to_problem_details();
                problem.detail = "Internal server error".to_string();
                problem
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let problem = self.to_problem();

        (
            status,
            [(header::CONTENT_TYPE, "application/problem+json")],
            Json(problem),
        )
            .into_response()
    }
}

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::editor::TemplateError;
use crate::selection::SelectionError;
use crate::services::upstream::UpstreamError;
use crate::sessions::SessionError;

/// Ошибка уровня HTTP-обработчиков.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    #[error("требуется вход в систему")]
    Unauthorized,
    #[error("{0}")]
    Forbidden(String),
    #[error("{0} не найден(а)")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("внутренняя ошибка: {0}")]
    Internal(String),
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

#[derive(Serialize)]
pub struct ApiError {
    success: bool,
    message: String,
}

pub type ApiResult<T> = Result<T, AppError>;

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Upstream(UpstreamError::CircuitOpen) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Upstream(UpstreamError::Status { status, .. }) if *status == 404 => {
                StatusCode::NOT_FOUND
            }
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl From<SelectionError> for AppError {
    fn from(err: SelectionError) -> Self {
        match err {
            SelectionError::Unauthorized => AppError::Unauthorized,
            err @ SelectionError::ForeignSession => AppError::Forbidden(err.to_string()),
            SelectionError::UnknownSeat(ss_id) => AppError::NotFound(format!("место {}", ss_id)),
            SelectionError::Validation(msg) => AppError::Validation(msg),
        }
    }
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::NotFound => AppError::NotFound("сессия".into()),
            SessionError::Busy => AppError::Conflict(err.to_string()),
        }
    }
}

// паника или отмена фоновой задачи
impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<TemplateError> for AppError {
    fn from(err: TemplateError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("request failed: {}", self);
        }
        let body = ApiError {
            success: false,
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

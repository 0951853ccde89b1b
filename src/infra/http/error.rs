use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::application::error::AppError;
use crate::application::repos::RepoError;

pub mod codes {
    pub const BAD_REQUEST: &str = "bad_request";
    pub const NOT_FOUND: &str = "not_found";
    pub const INTERNAL: &str = "internal_error";
}

#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    pub error: ApiErrorMessage,
}

#[derive(Debug, Serialize)]
pub struct ApiErrorMessage {
    pub code: String,
    pub message: String,
}

/// Diagnostic detail attached to error responses for the logging
/// middleware; never serialized to the client.
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub source: &'static str,
    pub status: StatusCode,
    pub detail: String,
}

impl ErrorReport {
    pub fn attach(self, response: &mut Response) {
        response.extensions_mut().insert(self);
    }
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
    detail: String,
}

impl ApiError {
    pub fn new(
        status: StatusCode,
        code: &'static str,
        message: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            status,
            code,
            message: message.into(),
            detail: detail.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        let message = message.into();
        let detail = message.clone();
        Self::new(StatusCode::BAD_REQUEST, codes::BAD_REQUEST, message, detail)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        let message = message.into();
        let detail = message.clone();
        Self::new(StatusCode::NOT_FOUND, codes::NOT_FOUND, message, detail)
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            codes::INTERNAL,
            "internal server error",
            detail,
        )
    }
}

impl From<AppError> for ApiError {
    fn from(error: AppError) -> Self {
        match error {
            AppError::Validation(message) => ApiError::bad_request(message),
            AppError::NotFound(entity) => ApiError::not_found(format!("{entity} not found")),
            AppError::Repo(RepoError::NotFound) => ApiError::not_found("resource not found"),
            AppError::Repo(RepoError::Duplicate { constraint }) => ApiError::new(
                StatusCode::BAD_REQUEST,
                codes::BAD_REQUEST,
                "duplicate record",
                format!("unique constraint `{constraint}` violated"),
            ),
            AppError::Repo(RepoError::InvalidInput { message }) => ApiError::bad_request(message),
            AppError::Repo(repo_error @ RepoError::Persistence(_)) => {
                ApiError::internal(repo_error.to_string())
            }
            AppError::Unexpected(detail) => ApiError::internal(detail),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            error: ApiErrorMessage {
                code: self.code.to_string(),
                message: self.message,
            },
        };
        let mut response = (self.status, Json(body)).into_response();
        ErrorReport {
            source: "infra::http",
            status: self.status,
            detail: format!("{}: {}", self.code, self.detail),
        }
        .attach(&mut response);
        response
    }
}

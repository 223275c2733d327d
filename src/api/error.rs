//! Mapping of directory errors onto HTTP responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, ValidationReason};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorType {
    ValidationError,
    ForbiddenError,
    NotFoundError,
    StorageError,
    PublicationError,
}

impl std::fmt::Display for ApiErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ValidationError => write!(f, "validation_error"),
            Self::ForbiddenError => write!(f, "forbidden_error"),
            Self::NotFoundError => write!(f, "not_found_error"),
            Self::StorageError => write!(f, "storage_error"),
            Self::PublicationError => write!(f, "publication_error"),
        }
    }
}

/// Body of every error response: `{"error": {"type": ..., "message": ...}}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: ApiErrorType,
    /// Offending field, for field validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
}

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub response: ApiErrorResponse,
}

impl ApiError {
    pub fn new(status: StatusCode, error_type: ApiErrorType, message: impl Into<String>) -> Self {
        Self {
            status,
            response: ApiErrorResponse {
                error: ApiErrorDetail {
                    message: message.into(),
                    error_type,
                    param: None,
                },
            },
        }
    }

    pub fn with_param(mut self, param: impl Into<String>) -> Self {
        self.response.error.param = Some(param.into());
        self
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.response)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation { reason } => {
                let param = match &reason {
                    ValidationReason::InvalidField { field, .. } => Some(*field),
                    _ => None,
                };
                let error = Self::new(
                    StatusCode::BAD_REQUEST,
                    ApiErrorType::ValidationError,
                    reason.to_string(),
                );
                match param {
                    Some(field) => error.with_param(field),
                    None => error,
                }
            }
            DomainError::Forbidden { reason } => Self::new(
                StatusCode::FORBIDDEN,
                ApiErrorType::ForbiddenError,
                reason.to_string(),
            ),
            DomainError::NotFound { message } => {
                Self::new(StatusCode::NOT_FOUND, ApiErrorType::NotFoundError, message)
            }
            DomainError::Storage { message } => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiErrorType::StorageError,
                message,
            ),
            DomainError::Publication { message } => Self::new(
                StatusCode::BAD_GATEWAY,
                ApiErrorType::PublicationError,
                message,
            ),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}",
            self.response.error.error_type, self.response.error.message
        )
    }
}

impl std::error::Error for ApiError {}

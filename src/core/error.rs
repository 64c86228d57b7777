use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::modules::llm::LlmError;
use crate::shared::prompts::TemplateError;
use crate::shared::types::ErrorResponse;

/// Coarse classification used for status codes and log levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// User-correctable input problem (400)
    Validation,
    /// Requested record does not exist (404)
    NotFound,
    /// Extraction, generation, or storage failed (500)
    Dependency,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Failed to extract text from {document}: {message}")]
    Extraction { document: String, message: String },

    #[error("Text generation failed: {0}")]
    Generation(#[from] LlmError),

    #[error("Failed to build prompt: {0}")]
    Template(#[from] TemplateError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) | AppError::PayloadTooLarge(_) => {
                ErrorKind::Validation
            }
            AppError::NotFound(_) => ErrorKind::NotFound,
            AppError::Extraction { .. }
            | AppError::Generation(_)
            | AppError::Template(_)
            | AppError::Database(_)
            | AppError::Internal(_) => ErrorKind::Dependency,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        if let AppError::PayloadTooLarge(_) = self {
            return StatusCode::PAYLOAD_TOO_LARGE;
        }
        match self.kind() {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Dependency => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self.kind() {
            ErrorKind::Dependency => tracing::error!(error = ?self, "Request failed: {}", self),
            ErrorKind::Validation | ErrorKind::NotFound => {
                tracing::debug!("Request rejected ({}): {}", status, self)
            }
        }

        let body = Json(ErrorResponse {
            error: self.to_string(),
        });

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

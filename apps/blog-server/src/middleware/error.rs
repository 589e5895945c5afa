//! Error handling - maps failures to `{"message": ...}` JSON responses.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use blogmini_core::DomainError;
use blogmini_shared::MessageResponse;
use std::fmt;

/// Application-level error type returned by handlers.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    /// An unexpected failure. `context` names the operation, `detail` is the
    /// underlying error text.
    Internal {
        context: &'static str,
        detail: String,
    },
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Internal { context, detail } => write!(f, "{}: {}", context, detail),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::NotFound(msg) | AppError::BadRequest(msg) => MessageResponse::new(msg),
            AppError::Internal { context, detail } => {
                tracing::error!(error = %detail, "{}", context);
                MessageResponse::new(*context).with_error(detail)
            }
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

impl AppError {
    /// Convert a domain error, naming the operation for internal failures.
    pub fn from_domain(err: DomainError, context: &'static str) -> Self {
        match err {
            DomainError::NotFound { entity_type, .. } => {
                AppError::NotFound(format!("{} not found", entity_type))
            }
            DomainError::Validation(msg) => AppError::BadRequest(msg),
            DomainError::Internal(detail) => AppError::Internal { context, detail },
        }
    }
}

/// Attach an operation name to a domain result.
pub trait DomainResultExt<T> {
    fn or_fail(self, context: &'static str) -> AppResult<T>;
}

impl<T> DomainResultExt<T> for Result<T, DomainError> {
    fn or_fail(self, context: &'static str) -> AppResult<T> {
        self.map_err(|e| AppError::from_domain(e, context))
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

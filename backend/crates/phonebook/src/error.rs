//! Phonebook Error Types
//!
//! Phone-record error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Phonebook result type alias
pub type PhoneResult<T> = Result<T, PhoneError>;

#[derive(Debug, Error)]
pub enum PhoneError {
    /// Missing or invalid request fields
    #[error("{0}")]
    Validation(String),

    /// Record exists but belongs to another account
    #[error("Phone does not belong to user")]
    Forbidden,

    #[error("Phone not found")]
    NotFound,

    /// Phone number already registered (by anyone)
    #[error("Phone number already exists")]
    DuplicateNumber,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PhoneError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            PhoneError::Validation(_) => ErrorKind::BadRequest,
            PhoneError::Forbidden => ErrorKind::Forbidden,
            PhoneError::NotFound => ErrorKind::NotFound,
            PhoneError::DuplicateNumber => ErrorKind::Conflict,
            PhoneError::Database(_) | PhoneError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError; server-side detail stays in the logs
    pub fn to_app_error(&self) -> AppError {
        if self.kind().is_server_error() {
            AppError::internal("Internal server error")
        } else {
            AppError::new(self.kind(), self.to_string())
        }
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            PhoneError::Database(e) => {
                tracing::error!(error = %e, "Phonebook database error");
            }
            PhoneError::Internal(msg) => {
                tracing::error!(message = %msg, "Phonebook internal error");
            }
            PhoneError::Forbidden => {
                tracing::warn!("Attempt to modify another user's phone");
            }
            _ => {
                tracing::debug!(error = %self, "Phonebook error");
            }
        }
    }
}

impl IntoResponse for PhoneError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<PhoneError> for AppError {
    fn from(err: PhoneError) -> Self {
        err.log();
        err.to_app_error()
    }
}

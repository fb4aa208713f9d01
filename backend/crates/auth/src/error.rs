//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::PasswordHashError;
use platform::token::TokenError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Why a request carrying (or lacking) a session token was turned away
///
/// Only ever logged. Clients see the same `Unauthorized` response for all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum SessionRejection {
    MissingToken,
    BadSignature,
    Malformed,
    Expired,
    UnknownAccount,
    StaleLogin,
}

impl From<TokenError> for SessionRejection {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::BadSignature => SessionRejection::BadSignature,
            TokenError::Expired => SessionRejection::Expired,
            TokenError::Malformed | TokenError::Encoding(_) => SessionRejection::Malformed,
        }
    }
}

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Missing or invalid request fields
    #[error("{0}")]
    Validation(String),

    /// Unknown login or wrong password (indistinguishable on purpose)
    #[error("Invalid login or password")]
    InvalidCredentials,

    /// No usable session on a protected route
    #[error("Unauthorized")]
    Unauthenticated(SessionRejection),

    /// Account lookup by name found nothing
    #[error("User not found")]
    NotFound,

    /// Login already registered
    #[error("User with this login already exists")]
    LoginTaken,

    /// Password hashing failed
    #[error("Password hashing failed: {0}")]
    Hashing(#[from] PasswordHashError),

    /// Session token could not be issued
    #[error("Session token error: {0}")]
    Token(TokenError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_) => ErrorKind::BadRequest,
            AuthError::InvalidCredentials | AuthError::Unauthenticated(_) => {
                ErrorKind::Unauthorized
            }
            AuthError::NotFound => ErrorKind::NotFound,
            AuthError::LoginTaken => ErrorKind::Conflict,
            AuthError::Hashing(_)
            | AuthError::Token(_)
            | AuthError::Database(_)
            | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    ///
    /// Server-side failures get a generic message; the detail is only logged.
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
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Hashing(e) => {
                tracing::error!(error = %e, "Password hashing error");
            }
            AuthError::Token(e) => {
                tracing::error!(error = %e, "Session token error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::Unauthenticated(reason) => {
                tracing::debug!(reason = %reason, "Session rejected");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        err.log();
        err.to_app_error()
    }
}

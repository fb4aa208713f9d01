//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use platform::cookie;

use crate::application::config::AuthConfig;
use crate::application::{
    ChangeLoginUseCase, GetProfileUseCase, SessionAuthenticator, SignInInput, SignUpInput,
    SignUpUseCase,
};
use crate::domain::entity::AccountProfile;
use crate::domain::repository::AccountRepository;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{AuthRequest, ChangeLoginRequest, MessageResponse, RegisterRequest};
use crate::presentation::middleware::CurrentAccount;

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

/// Malformed JSON bodies are a validation failure like any other
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> AuthResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AuthError::Validation(rejection.body_text()))
}

fn session_cookie_header(config: &AuthConfig, token: &str) -> AuthResult<header::HeaderValue> {
    cookie::set_cookie_header(&config.session_cookie(), token)
        .map_err(|e| AuthError::Internal(format!("Invalid session cookie: {e}")))
}

// ============================================================================
// Register
// ============================================================================

/// POST /user/register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> AuthResult<Json<MessageResponse>>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let req = json_body(payload)?;

    let use_case = SignUpUseCase::new(state.repo.clone(), state.config.clone());
    use_case
        .execute(SignUpInput {
            login: req.login,
            password: req.password,
            name: req.name,
            age: req.age,
        })
        .await?;

    Ok(Json(MessageResponse::new("User registered successfully")))
}

// ============================================================================
// Authenticate
// ============================================================================

/// POST /user/auth
pub async fn authenticate<R>(
    State(state): State<AuthAppState<R>>,
    payload: Result<Json<AuthRequest>, JsonRejection>,
) -> AuthResult<impl IntoResponse>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let req = json_body(payload)?;

    let authenticator = SessionAuthenticator::new(state.repo.clone(), state.config.clone());
    let output = authenticator
        .authenticate(SignInInput {
            login: req.login,
            password: req.password,
        })
        .await?;

    let cookie = session_cookie_header(&state.config, &output.session_token)?;

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(MessageResponse::new("Authentication successful")),
    ))
}

// ============================================================================
// Sign Out
// ============================================================================

/// POST /user/logout
///
/// Only clears the cookie. The token itself stays valid until it expires.
pub async fn logout<R>(State(state): State<AuthAppState<R>>) -> AuthResult<impl IntoResponse>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let cookie = cookie::delete_cookie_header(&state.config.session_cookie())
        .map_err(|e| AuthError::Internal(format!("Invalid session cookie: {e}")))?;

    Ok((StatusCode::NO_CONTENT, [(header::SET_COOKIE, cookie)]))
}

// ============================================================================
// Protected
// ============================================================================

/// PUT /user/login
pub async fn change_login<R>(
    State(state): State<AuthAppState<R>>,
    CurrentAccount(account_id): CurrentAccount,
    payload: Result<Json<ChangeLoginRequest>, JsonRejection>,
) -> AuthResult<impl IntoResponse>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let req = json_body(payload)?;

    let use_case = ChangeLoginUseCase::new(state.repo.clone(), state.config.clone());
    let token = use_case.execute(account_id, &req.login).await?;

    let cookie = session_cookie_header(&state.config, &token)?;

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(MessageResponse::new("Login updated successfully")),
    ))
}

/// GET /user/{name}
pub async fn get_profile<R>(
    State(state): State<AuthAppState<R>>,
    _caller: CurrentAccount,
    Path(name): Path<String>,
) -> AuthResult<Json<AccountProfile>>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let use_case = GetProfileUseCase::new(state.repo.clone());
    Ok(Json(use_case.execute(&name).await?))
}

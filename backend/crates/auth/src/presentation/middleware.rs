//! Auth Middleware
//!
//! Gate for protected routes. Resolves the session cookie to an account id
//! and hands it to handlers through request extensions.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::extract::{FromRequestParts, State};
use axum::http::Request;
use axum::http::request::Parts;
use axum::middleware::{self, Next};
use axum::response::Response;
use kernel::id::AccountId;

use crate::application::RequestAuthorizer;
use crate::application::config::AuthConfig;
use crate::domain::repository::AccountRepository;
use crate::error::{AuthError, SessionRejection};

/// Middleware state
#[derive(Clone)]
pub struct AuthMiddlewareState<R>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

/// The authenticated caller, available to handlers behind [`require_session`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentAccount(pub AccountId);

impl<S> FromRequestParts<S> for CurrentAccount
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentAccount>()
            .copied()
            .ok_or(AuthError::Unauthenticated(SessionRejection::MissingToken))
    }
}

/// Middleware that requires a valid session cookie
pub async fn require_session<R>(
    State(state): State<AuthMiddlewareState<R>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let token = platform::cookie::extract_cookie(req.headers(), &state.config.session_cookie_name);

    let authorizer = RequestAuthorizer::new(state.repo.clone(), state.config.clone());
    let account_id = authorizer.authorize(token.as_deref()).await?;

    req.extensions_mut().insert(CurrentAccount(account_id));

    Ok(next.run(req).await)
}

/// Put every route of `router` behind [`require_session`]
///
/// Uses `route_layer`, so unmatched paths still produce 404 rather than 401.
pub fn with_session<R>(router: Router, state: AuthMiddlewareState<R>) -> Router
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    router.route_layer(middleware::from_fn_with_state(state, require_session::<R>))
}

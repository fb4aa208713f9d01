//! Auth Router
//!
//! Two routers: the public one (register, authenticate, sign out) and the
//! protected one, which must be wrapped with
//! [`with_session`](crate::presentation::middleware::with_session) by the caller.

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::domain::repository::AccountRepository;
use crate::presentation::handlers::{self, AuthAppState};

/// Routes reachable without a session
pub fn public_router<R>(state: AuthAppState<R>) -> Router
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/register", post(handlers::register::<R>))
        .route("/auth", post(handlers::authenticate::<R>))
        .route("/logout", post(handlers::logout::<R>))
        .with_state(state)
}

/// Routes that require a [`CurrentAccount`](crate::presentation::middleware::CurrentAccount)
pub fn protected_router<R>(state: AuthAppState<R>) -> Router
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/login", put(handlers::change_login::<R>))
        .route("/{name}", get(handlers::get_profile::<R>))
        .with_state(state)
}

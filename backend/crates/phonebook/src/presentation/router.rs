//! Phonebook Router
//!
//! Every route needs a session; wrap the result with
//! `auth::middleware::with_session`.

use axum::{
    Router,
    routing::{delete, get},
};

use crate::domain::repository::PhoneRepository;
use crate::presentation::handlers::{self, PhoneAppState};

pub fn phonebook_router<R>(state: PhoneAppState<R>) -> Router
where
    R: PhoneRepository + Clone + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/phone",
            get(handlers::search_phones::<R>)
                .post(handlers::add_phone::<R>)
                .put(handlers::update_phone::<R>),
        )
        .route("/phone/{phone_id}", delete(handlers::delete_phone::<R>))
        .with_state(state)
}

//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; request errors are rendered by the
//! `auth` and `phonebook` error types.

mod app;
mod config;

use std::sync::Arc;

use auth::{MemoryAuthRepository, PgAuthRepository};
use axum::{
    Router, http,
    http::{Method, header},
};
use phonebook::{MemoryPhoneRepository, PgPhoneRepository};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api=info,auth=info,phonebook=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let ServerConfig {
        database_url,
        listen_addr,
        frontend_origins,
        auth: auth_config,
    } = ServerConfig::from_env()?;
    let auth_config = Arc::new(auth_config);

    tracing::info!(
        session_ttl_secs = auth_config.session_ttl().map(|ttl| ttl.as_secs()),
        cookie_secure = auth_config.cookie_secure,
        "Auth configured"
    );

    let routes = match database_url {
        Some(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(&database_url)
                .await?;

            tracing::info!("Connected to database");

            // Run migrations
            sqlx::migrate!("../../../database/migrations")
                .run(&pool)
                .await?;

            tracing::info!("Migrations completed");

            app::build_router(
                Arc::new(PgAuthRepository::new(pool.clone())),
                Arc::new(PgPhoneRepository::new(pool)),
                auth_config,
            )
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory storage");
            app::build_router(
                Arc::new(MemoryAuthRepository::new()),
                Arc::new(MemoryPhoneRepository::new()),
                auth_config,
            )
        }
    };

    // CORS configuration
    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::COOKIE,
        ]))
        .allow_credentials(true);

    let app = Router::new()
        .merge(routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    tracing::info!("Listening on {}", listen_addr);

    let listener = TcpListener::bind(listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

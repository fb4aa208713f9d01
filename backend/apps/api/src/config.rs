//! Server Configuration
//!
//! Everything the binary reads from the environment, resolved once at startup.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, bail};
use auth::AuthConfig;
use auth::config::{DEFAULT_SESSION_TTL, MAX_SESSION_TTL};
use platform::crypto;
use platform::password::{HashCost, PasswordPolicy};
use platform::token::SigningKey;

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

/// Resolved server settings
pub struct ServerConfig {
    pub database_url: Option<String>,
    pub listen_addr: SocketAddr,
    pub frontend_origins: Vec<String>,
    pub auth: AuthConfig,
}

impl ServerConfig {
    /// Read settings from the process environment
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok(), cfg!(debug_assertions))
    }

    /// Resolve settings through `lookup`. Debug builds fall back to an
    /// ephemeral signing key and plain-HTTP cookies.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        debug_build: bool,
    ) -> anyhow::Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let signing_key = match var("SESSION_SIGNING_KEY") {
            Some(encoded) => SigningKey::from_base64(encoded.trim())
                .context("SESSION_SIGNING_KEY must be base64 of at least 32 bytes")?,
            None if debug_build => {
                tracing::warn!("SESSION_SIGNING_KEY not set, using an ephemeral key");
                SigningKey::generate()
            }
            None => bail!("SESSION_SIGNING_KEY must be set in production"),
        };

        let session_ttl = match var("SESSION_TTL_SECS") {
            Some(raw) => match raw
                .trim()
                .parse::<u64>()
                .context("SESSION_TTL_SECS must be a number of seconds")?
            {
                0 => None,
                secs if secs > MAX_SESSION_TTL.as_secs() => bail!(
                    "SESSION_TTL_SECS must be at most {}",
                    MAX_SESSION_TTL.as_secs()
                ),
                secs => Some(Duration::from_secs(secs)),
            },
            None => Some(DEFAULT_SESSION_TTL),
        };

        let cookie_secure = match var("COOKIE_SECURE") {
            Some(raw) => parse_bool(&raw).context("COOKIE_SECURE must be true or false")?,
            None => !debug_build,
        };

        let pepper = var("PASSWORD_PEPPER")
            .map(|encoded| crypto::from_base64(encoded.trim()))
            .transpose()
            .context("PASSWORD_PEPPER must be base64")?;

        let mut policy = PasswordPolicy::default();
        if let Some(raw) = var("PASSWORD_MIN_LENGTH") {
            policy.min_length = raw
                .trim()
                .parse()
                .context("PASSWORD_MIN_LENGTH must be a positive number")?;
        }

        let auth = AuthConfig::new(signing_key)
            .with_session_ttl(session_ttl)
            .with_cookie_secure(cookie_secure)
            .with_password_policy(policy)
            .with_password_hashing(HashCost::default(), pepper);

        let listen_addr = var("LISTEN_ADDR")
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string())
            .trim()
            .parse()
            .context("LISTEN_ADDR must be host:port")?;

        let frontend_origins = var("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        let database_url = var("DATABASE_URL");
        if database_url.is_none() && !debug_build {
            bail!("DATABASE_URL must be set in production");
        }

        Ok(Self {
            database_url,
            listen_addr,
            frontend_origins,
            auth,
        })
    }
}

fn parse_bool(raw: &str) -> anyhow::Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("not a boolean: {other}"),
    }
}

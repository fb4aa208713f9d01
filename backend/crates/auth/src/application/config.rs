//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use platform::cookie::CookieConfig;
use platform::password::{CredentialHasher, HashCost, PasswordPolicy};
use platform::token::{SigningKey, TokenCodec};

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Default session lifetime (24 hours)
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(24 * 3600);

/// Longest session lifetime accepted from configuration (one year)
pub const MAX_SESSION_TTL: Duration = Duration::from_secs(365 * 24 * 3600);

/// Session cookie name understood by existing clients
pub const SESSION_COOKIE_NAME: &str = "SESSTOKEN";

/// Auth application configuration
///
/// Built once at startup and shared read-only (`Arc<AuthConfig>`).
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Session cookie name
    pub session_cookie_name: String,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Rules for new passwords (registration only)
    pub password_policy: PasswordPolicy,
    tokens: TokenCodec,
    hasher: CredentialHasher,
}

impl AuthConfig {
    /// Production defaults around the given signing key
    pub fn new(signing_key: SigningKey) -> Self {
        Self {
            session_cookie_name: SESSION_COOKIE_NAME.to_string(),
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            password_policy: PasswordPolicy::default(),
            tokens: TokenCodec::new(signing_key).with_ttl(Some(DEFAULT_SESSION_TTL)),
            hasher: CredentialHasher::default(),
        }
    }

    /// Create config with a random signing key (sessions do not survive restarts)
    pub fn with_random_secret() -> Self {
        Self::new(SigningKey::generate())
    }

    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secret()
        }
    }

    /// Session lifetime; `None` issues tokens without `exp`
    pub fn with_session_ttl(mut self, ttl: Option<Duration>) -> Self {
        self.tokens = self.tokens.with_ttl(ttl);
        self
    }

    pub fn with_password_hashing(mut self, cost: HashCost, pepper: Option<Vec<u8>>) -> Self {
        self.hasher = CredentialHasher::new(cost, pepper);
        self
    }

    pub fn with_password_policy(mut self, policy: PasswordPolicy) -> Self {
        self.password_policy = policy;
        self
    }

    pub fn with_cookie_secure(mut self, secure: bool) -> Self {
        self.cookie_secure = secure;
        self
    }

    pub fn tokens(&self) -> &TokenCodec {
        &self.tokens
    }

    pub fn hasher(&self) -> &CredentialHasher {
        &self.hasher
    }

    pub fn session_ttl(&self) -> Option<Duration> {
        self.tokens.ttl()
    }

    /// Cookie settings for the session token; Max-Age follows the token lifetime
    pub fn session_cookie(&self) -> CookieConfig {
        CookieConfig {
            name: self.session_cookie_name.clone(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: self.cookie_same_site,
            path: "/".to_string(),
            max_age_secs: self
                .session_ttl()
                .and_then(|ttl| i64::try_from(ttl.as_secs()).ok()),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self::with_random_secret()
    }
}

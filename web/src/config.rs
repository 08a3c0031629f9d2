//! Application configuration.

use chrono::Duration;

/// Default institutional email domain suffix for signups.
pub const DEFAULT_EMAIL_DOMAIN_SUFFIX: &str = "@students.towson.edu";

/// Default bind address for the HTTP server.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Default session lifetime in hours.
pub const DEFAULT_SESSION_TTL_HOURS: i64 = 24;

/// Configuration for the marketplace service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the HTTP server binds to.
    pub bind_addr: String,
    /// Required suffix for signup email addresses.
    pub email_domain_suffix: String,
    /// How long a login session stays valid.
    pub session_ttl: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            email_domain_suffix: DEFAULT_EMAIL_DOMAIN_SUFFIX.to_string(),
            session_ttl: Duration::hours(DEFAULT_SESSION_TTL_HOURS),
        }
    }
}

impl AppConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the bind address.
    #[must_use]
    pub fn with_bind_addr(mut self, bind_addr: impl Into<String>) -> Self {
        self.bind_addr = bind_addr.into();
        self
    }

    /// Set the required signup email suffix.
    #[must_use]
    pub fn with_email_domain_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.email_domain_suffix = suffix.into();
        self
    }

    /// Set the session lifetime.
    #[must_use]
    pub const fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = ttl;
        self
    }

    /// Load configuration from environment variables, falling back to
    /// defaults: `BIND_ADDR`, `EMAIL_DOMAIN_SUFFIX`,
    /// `SESSION_TTL_HOURS`.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(bind_addr) = std::env::var("BIND_ADDR") {
            config.bind_addr = bind_addr;
        }
        if let Ok(suffix) = std::env::var("EMAIL_DOMAIN_SUFFIX") {
            config.email_domain_suffix = suffix;
        }
        if let Some(hours) = std::env::var("SESSION_TTL_HOURS")
            .ok()
            .and_then(|raw| raw.parse::<i64>().ok())
        {
            config.session_ttl = Duration::hours(hours);
        }
        config
    }
}

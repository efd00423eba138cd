use crate::auth::session_token::SessionConfig;

/// Default public cache lifetime advertised on proxy settings responses.
pub const DEFAULT_PROXY_CACHE_MAX_AGE_SECS: u64 = 60;

/// Server configuration loaded from environment variables.
///
/// All fields except the app credentials have defaults suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Origins allowed to call the admin API, parsed from comma-separated
    /// `CORS_ORIGINS`. The storefront proxy is open to any origin.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long to wait for in-flight requests on shutdown (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// `max-age` on successful proxy responses (default: `60`).
    pub proxy_cache_max_age_secs: u64,
    /// PostgreSQL URL; settings are kept in memory when unset.
    pub database_url: Option<String>,
    /// App credentials for admin session tokens.
    pub session: SessionConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                       |
    /// |----------------------------|-------------------------------|
    /// | `HOST`                     | `0.0.0.0`                     |
    /// | `PORT`                     | `3000`                        |
    /// | `CORS_ORIGINS`             | `https://admin.shopify.com`   |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`                          |
    /// | `SHUTDOWN_TIMEOUT_SECS`    | `30`                          |
    /// | `PROXY_CACHE_MAX_AGE_SECS` | `60`                          |
    /// | `DATABASE_URL`             | unset (in-memory store)       |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "https://admin.shopify.com".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let proxy_cache_max_age_secs: u64 = std::env::var("PROXY_CACHE_MAX_AGE_SECS")
            .unwrap_or_else(|_| DEFAULT_PROXY_CACHE_MAX_AGE_SECS.to_string())
            .parse()
            .expect("PROXY_CACHE_MAX_AGE_SECS must be a valid u64");

        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());

        let session = SessionConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            proxy_cache_max_age_secs,
            database_url,
            session,
        }
    }
}

//! Configuration loading and constants.
//!
//! All runtime configuration comes from environment variables, read once at
//! startup. `AppConfig` is the root configuration struct handed to the rest
//! of the application; nothing re-reads the environment after that.

// =============================================================================
// Environment Variables
// =============================================================================

/// TCP port to bind. Defaults to [`DEFAULT_PORT`] when unset or empty.
pub const ENV_PORT: &str = "PORT";

/// Version string reported verbatim in the greeting response.
pub const ENV_APP_VERSION: &str = "APP_VERSION";

/// Log output format: "text" (default) or "json".
pub const ENV_LOG_FORMAT: &str = "LOG_FORMAT";

// =============================================================================
// Defaults and Fixed Limits
// =============================================================================

/// Port used when `PORT` is unset or empty
pub const DEFAULT_PORT: u16 = 8080;

/// Per-request read bound: a client that has not delivered its request head
/// within this window is disconnected
pub const HTTP_READ_TIMEOUT_SECS: u64 = 10;

/// Per-request write bound: a response that has not been produced within
/// this window is aborted
pub const HTTP_WRITE_TIMEOUT_SECS: u64 = 10;

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "skiff=debug,tower_http=info";

/// Default log format (text or json)
pub const DEFAULT_LOG_FORMAT: &str = "text";

/// Fixed message returned by the greeting endpoint
pub const GREETING_MESSAGE: &str = "Hello from Rust Multi-Stage Docker!";

/// Application configuration, read from the environment once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// TCP port the listener binds
    pub port: u16,
    /// Verbatim `APP_VERSION` value; empty string when unset
    pub app_version: String,
    /// Log output format: "text" or "json"
    pub log_format: String,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source. Tests use this
    /// to avoid mutating the process environment.
    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup(ENV_PORT) {
            None => DEFAULT_PORT,
            Some(raw) if raw.is_empty() => DEFAULT_PORT,
            Some(raw) => raw
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
        };

        let app_version = lookup(ENV_APP_VERSION).unwrap_or_default();

        let log_format = match lookup(ENV_LOG_FORMAT) {
            Some(raw) if !raw.is_empty() => raw,
            _ => DEFAULT_LOG_FORMAT.to_string(),
        };

        Ok(Self {
            port,
            app_version,
            log_format,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid PORT value '{0}': expected a TCP port number")]
    InvalidPort(String),
}

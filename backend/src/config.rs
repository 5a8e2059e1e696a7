//! Process-level server settings read from the environment.
//!
//! # Environment Variables
//!
//! - `HOST`: bind host (default: 0.0.0.0)
//! - `PORT`: bind port (default: 8000)
//! - `ALLOWED_ORIGINS`: comma-separated CORS origins, or `*` (default: `*`)
//! - `REQUEST_TIMEOUT_SECS`: per-request timeout (default: 30)

use std::env;
use std::time::Duration;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Origins allowed by the CORS layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedOrigins {
    Any,
    List(Vec<String>),
}

impl AllowedOrigins {
    /// Parse a comma-separated origin list. Entries are trimmed and empty
    /// entries dropped; a `*` anywhere allows every origin.
    pub fn parse(raw: &str) -> Self {
        let origins: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect();

        if origins.iter().any(|o| o == "*") {
            Self::Any
        } else {
            Self::List(origins)
        }
    }
}

impl Default for AllowedOrigins {
    fn default() -> Self {
        Self::Any
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub allowed_origins: AllowedOrigins,
    pub request_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            allowed_origins: AllowedOrigins::Any,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl ServerConfig {
    /// Read settings from the environment, falling back to defaults for
    /// anything unset.
    ///
    /// # Errors
    /// Returns an error if `PORT` or `REQUEST_TIMEOUT_SECS` is set but not a
    /// valid number.
    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let port = match env::var("PORT") {
            Ok(v) => v
                .trim()
                .parse::<u16>()
                .map_err(|_| format!("PORT must be a valid port number, got '{}'", v))?,
            Err(_) => DEFAULT_PORT,
        };
        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .map(|v| AllowedOrigins::parse(&v))
            .unwrap_or_default();
        let timeout_secs = match env::var("REQUEST_TIMEOUT_SECS") {
            Ok(v) => v.trim().parse::<u64>().map_err(|_| {
                format!("REQUEST_TIMEOUT_SECS must be a whole number of seconds, got '{}'", v)
            })?,
            Err(_) => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        Ok(Self {
            host,
            port,
            allowed_origins,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

//! Application configuration loaded from environment variables.

use std::time::Duration;

use saga::{CallPolicy, RetryPolicy};

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST` — bind address (default: `"0.0.0.0"`)
/// - `PORT` — listen port (default: `3000`)
/// - `RUST_LOG` — tracing filter directive (default: `"info"`)
/// - `HOTEL_TIMEOUT_MS` — per-call gateway timeout (default: `2000`)
/// - `HOTEL_RETRIES` — retries per gateway call (default: `3`)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub hotel_timeout_ms: u64,
    pub hotel_retries: u32,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            hotel_timeout_ms: std::env::var("HOTEL_TIMEOUT_MS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(2000),
            hotel_retries: std::env::var("HOTEL_RETRIES")
                .ok()
                .and_then(|r| r.parse().ok())
                .unwrap_or(3),
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the per-call timeout/retry policy for the hotel gateway.
    pub fn call_policy(&self) -> CallPolicy {
        CallPolicy {
            timeout: Duration::from_millis(self.hotel_timeout_ms),
            retry: RetryPolicy {
                max_retries: self.hotel_retries,
                ..RetryPolicy::default()
            },
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_level: "info".to_string(),
            hotel_timeout_ms: 2000,
            hotel_retries: 3,
        }
    }
}

use std::time::Duration;

use anyhow::{Context, Result};

/// Client configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the Lightning backend, e.g. `http://localhost:8000`.
    pub api_url: String,
    /// Base URL of the identity provider.
    pub auth_url: String,
    /// Public (anon) API key sent to the identity provider.
    pub auth_anon_key: String,
    /// Optional non-interactive credentials; prompted for when absent.
    pub email: Option<String>,
    pub password: Option<String>,
    pub http_timeout_secs: u64,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            api_url: require_env("LIGHTNING_API_URL")?,
            auth_url: require_env("LIGHTNING_AUTH_URL")?,
            auth_anon_key: require_env("LIGHTNING_AUTH_ANON_KEY")?,
            email: std::env::var("LIGHTNING_EMAIL").ok(),
            password: std::env::var("LIGHTNING_PASSWORD").ok(),
            http_timeout_secs: std::env::var("HTTP_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse::<u64>()
                .context("HTTP_TIMEOUT_SECS must be a number of seconds")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

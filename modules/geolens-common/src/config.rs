use std::env;

use tracing::info;

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the GEO analysis API, including the `/api` prefix.
    pub api_url: String,

    /// Path of the JSON file holding the session token pair.
    pub session_file: String,

    /// Seconds between poll ticks while a job is active.
    pub poll_interval_secs: u64,

    /// Seconds to let the completion state render before opening the report.
    pub settle_delay_secs: u64,
}

impl Config {
    /// Load configuration from environment variables. Everything has a
    /// host-local default; nothing is required.
    pub fn from_env() -> Self {
        Self {
            api_url: env::var("GEOLENS_API_URL")
                .unwrap_or_else(|_| "http://localhost:8000/api".to_string()),
            session_file: env::var("GEOLENS_SESSION_FILE")
                .unwrap_or_else(|_| default_session_file()),
            poll_interval_secs: numeric_env("GEOLENS_POLL_INTERVAL_SECS", 2),
            settle_delay_secs: numeric_env("GEOLENS_SETTLE_DELAY_SECS", 2),
        }
    }

    /// Log a startup summary. Token contents never appear here, only the
    /// path they live at.
    pub fn log_redacted(&self) {
        info!(
            api_url = self.api_url.as_str(),
            session_file = self.session_file.as_str(),
            poll_interval_secs = self.poll_interval_secs,
            "Configuration loaded"
        );
    }
}

fn default_session_file() -> String {
    match env::var("HOME") {
        Ok(home) => format!("{home}/.geolens/session.json"),
        Err(_) => ".geolens-session.json".to_string(),
    }
}

fn numeric_env(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

use std::{env, time::Duration};

use tracing::warn;

const DEFAULT_TOKEN_DURATION: Duration = Duration::from_secs(24 * 60 * 60);

/// Runtime configuration, read from environment variables with defaults.
///
/// `token_secret` and `token_duration` are carried for the login surface
/// but nothing verifies tokens against them; see the auth middleware.
#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub data_file_path: String,
    pub token_secret: String,
    pub token_duration: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_address: "0.0.0.0:8080".into(),
            data_file_path: "data.json".into(),
            token_secret: "default-secret".into(),
            token_duration: DEFAULT_TOKEN_DURATION,
        }
    }
}

impl Config {
    /// Load from `SERVER_ADDRESS`, `DATA_FILE_PATH`, `TOKEN_SECRET` and
    /// `TOKEN_DURATION`. Unset or empty variables keep their defaults; an
    /// unparseable `TOKEN_DURATION` falls back to 24 hours with a warning.
    pub fn load() -> Self {
        let mut cfg = Self::default();

        if let Ok(addr) = env::var("SERVER_ADDRESS") {
            if !addr.is_empty() {
                cfg.server_address = addr;
            }
        }
        if let Ok(path) = env::var("DATA_FILE_PATH") {
            if !path.is_empty() {
                cfg.data_file_path = path;
            }
        }
        if let Ok(secret) = env::var("TOKEN_SECRET") {
            if !secret.is_empty() {
                cfg.token_secret = secret;
            }
        }
        if let Ok(raw) = env::var("TOKEN_DURATION") {
            cfg.token_duration = parse_token_duration(&raw);
        }

        cfg
    }
}

fn parse_token_duration(raw: &str) -> Duration {
    humantime::parse_duration(raw).unwrap_or_else(|e| {
        warn!(value = %raw, error = %e, "invalid TOKEN_DURATION, using default");
        DEFAULT_TOKEN_DURATION
    })
}

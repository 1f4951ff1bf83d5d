//! services/web/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development. The two backend credentials are filled in
//! by the deployment pipeline.

use chrono::{FixedOffset, Offset, Utc};
use std::net::SocketAddr;
use std::time::Duration;
use tracing::Level;

use bulletin_core::navigation::DEFAULT_REDIRECT_DELAY;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Connection credentials for the hosted backend.
#[derive(Clone, Debug)]
pub struct BackendConfig {
    pub endpoint: String,
    pub access_key: String,
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub backend_url: String,
    pub backend_anon_key: String,
    pub log_level: Level,
    pub redirect_delay: Duration,
    pub display_offset: FixedOffset,
    pub cookie_secure: bool,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // --- Load Server Settings ---
        let bind_address_str =
            lookup("BIND_ADDRESS").unwrap_or_else(|| "0.0.0.0:3000".to_string());
        let bind_address = bind_address_str.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
        })?;

        let log_level_str = lookup("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        // --- Load Backend Credentials ---
        let backend_url = lookup("BACKEND_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingVar("BACKEND_URL".to_string()))?
            .trim_end_matches('/')
            .to_string();
        let backend_anon_key = lookup("BACKEND_ANON_KEY")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingVar("BACKEND_ANON_KEY".to_string()))?;

        // --- Load Page Behaviour Settings ---
        let redirect_delay = match lookup("REDIRECT_DELAY_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map(Duration::from_secs).map_err(|_| {
                ConfigError::InvalidValue(
                    "REDIRECT_DELAY_SECS".to_string(),
                    format!("'{}' is not a whole number of seconds", raw),
                )
            })?,
            None => DEFAULT_REDIRECT_DELAY,
        };

        let display_offset = match lookup("DISPLAY_UTC_OFFSET_MINUTES") {
            Some(raw) => raw
                .trim()
                .parse::<i32>()
                .ok()
                .and_then(|minutes| minutes.checked_mul(60))
                .and_then(FixedOffset::east_opt)
                .ok_or_else(|| {
                    ConfigError::InvalidValue(
                        "DISPLAY_UTC_OFFSET_MINUTES".to_string(),
                        format!("'{}' is not a valid UTC offset in minutes", raw),
                    )
                })?,
            None => Utc.fix(),
        };

        let cookie_secure = match lookup("COOKIE_SECURE") {
            Some(raw) => parse_bool(&raw).ok_or_else(|| {
                ConfigError::InvalidValue("COOKIE_SECURE".to_string(), raw.clone())
            })?,
            None => false,
        };

        Ok(Self {
            bind_address,
            backend_url,
            backend_anon_key,
            log_level,
            redirect_delay,
            display_offset,
            cookie_secure,
        })
    }

    /// The endpoint and access key needed to construct the backend client.
    pub fn backend(&self) -> BackendConfig {
        BackendConfig {
            endpoint: self.backend_url.clone(),
            access_key: self.backend_anon_key.clone(),
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    const REQUIRED: [(&str, &str); 2] = [
        ("BACKEND_URL", "https://example.supabase.co/"),
        ("BACKEND_ANON_KEY", "anon-key"),
    ];

    #[test]
    fn defaults_apply_when_only_credentials_are_set() {
        let config = load(&REQUIRED).unwrap();
        assert_eq!(config.bind_address.to_string(), "0.0.0.0:3000");
        assert_eq!(config.backend_url, "https://example.supabase.co");
        assert_eq!(config.redirect_delay, Duration::from_secs(2));
        assert_eq!(config.display_offset.local_minus_utc(), 0);
        assert_eq!(config.log_level, Level::INFO);
        assert!(!config.cookie_secure);

        let backend = config.backend();
        assert_eq!(backend.endpoint, "https://example.supabase.co");
        assert_eq!(backend.access_key, "anon-key");
    }

    #[test]
    fn missing_backend_url_is_an_error() {
        let err = load(&[("BACKEND_ANON_KEY", "k")]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar(v) if v == "BACKEND_URL"));
    }

    #[test]
    fn blank_access_key_is_missing() {
        let err = load(&[("BACKEND_URL", "https://x"), ("BACKEND_ANON_KEY", "  ")]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar(v) if v == "BACKEND_ANON_KEY"));
    }

    #[test]
    fn overrides_are_parsed() {
        let mut vars = REQUIRED.to_vec();
        vars.extend([
            ("BIND_ADDRESS", "127.0.0.1:8080"),
            ("REDIRECT_DELAY_SECS", "5"),
            ("DISPLAY_UTC_OFFSET_MINUTES", "540"),
            ("COOKIE_SECURE", "yes"),
            ("RUST_LOG", "debug"),
        ]);
        let config = load(&vars).unwrap();
        assert_eq!(config.bind_address.port(), 8080);
        assert_eq!(config.redirect_delay, Duration::from_secs(5));
        assert_eq!(config.display_offset.local_minus_utc(), 540 * 60);
        assert!(config.cookie_secure);
        assert_eq!(config.log_level, Level::DEBUG);
    }

    #[test]
    fn invalid_values_are_reported() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("REDIRECT_DELAY_SECS", "soon"));
        assert!(matches!(
            load(&vars).unwrap_err(),
            ConfigError::InvalidValue(v, _) if v == "REDIRECT_DELAY_SECS"
        ));

        let mut vars = REQUIRED.to_vec();
        vars.push(("DISPLAY_UTC_OFFSET_MINUTES", "100000"));
        assert!(matches!(
            load(&vars).unwrap_err(),
            ConfigError::InvalidValue(v, _) if v == "DISPLAY_UTC_OFFSET_MINUTES"
        ));

        let mut vars = REQUIRED.to_vec();
        vars.push(("COOKIE_SECURE", "maybe"));
        assert!(matches!(
            load(&vars).unwrap_err(),
            ConfigError::InvalidValue(v, _) if v == "COOKIE_SECURE"
        ));
    }
}

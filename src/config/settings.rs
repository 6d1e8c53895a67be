//! Application settings loaded from `config.toml` and the environment.
//!
//! Every section carries defaults, so an empty (or missing) file still yields a usable
//! configuration. Secrets never live in the TOML file: the Discord token and the game
//! API token come from environment variables (optionally via `.env`).

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::{path::Path, time::Duration};

/// Default location of the settings file.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Top-level settings
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Game REST API
    pub api: ApiConfig,
    /// Chart rendering service
    pub charts: ChartsConfig,
    /// Auxiliary lookup services
    pub lookup: LookupConfig,
    /// Interactive session timings
    pub sessions: SessionsConfig,
    /// Support pointers shown in generic error notices
    pub support: SupportConfig,
}

/// Game REST API settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the game API
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.airlinemanager.com/api".to_string(),
        }
    }
}

/// Chart service settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChartsConfig {
    /// Base URL of the chart rendering service
    pub base_url: String,
    /// Rendered image width in pixels
    pub width: u32,
    /// Rendered image height in pixels
    pub height: u32,
    /// Chart background color
    pub background_color: String,
}

impl Default for ChartsConfig {
    fn default() -> Self {
        Self {
            base_url: "https://quickchart.io".to_string(),
            width: 800,
            height: 450,
            background_color: "#2f3136".to_string(),
        }
    }
}

/// Auxiliary HTTP lookups
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    /// Dictionary API base URL
    pub dictionary_url: String,
    /// Random fact API base URL
    pub facts_url: String,
    /// QR code generator base URL
    pub qr_url: String,
    /// Upper bound on one lookup request, in seconds
    pub request_timeout_secs: u64,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            dictionary_url: "https://api.dictionaryapi.dev".to_string(),
            facts_url: "https://uselessfacts.jsph.pl".to_string(),
            qr_url: "https://api.qrserver.com".to_string(),
            request_timeout_secs: 10,
        }
    }
}

impl LookupConfig {
    /// Request timeout as a [`Duration`]
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Session timings, in seconds
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionsConfig {
    /// Idle window after which interactive replies are disabled
    pub idle_timeout_secs: u64,
    /// How long a one-shot confirmation prompt waits for a click
    pub confirm_timeout_secs: u64,
    /// How long each quiz round accepts answers
    pub quiz_round_secs: u64,
}

impl Default for SessionsConfig {
    fn default() -> Self {
        Self {
            idle_timeout_secs: 600,
            confirm_timeout_secs: 60,
            quiz_round_secs: 30,
        }
    }
}

impl SessionsConfig {
    /// Idle timeout as a [`Duration`]
    #[must_use]
    pub const fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    /// Confirmation timeout as a [`Duration`]
    #[must_use]
    pub const fn confirm_timeout(&self) -> Duration {
        Duration::from_secs(self.confirm_timeout_secs)
    }

    /// Quiz round length as a [`Duration`]
    #[must_use]
    pub const fn quiz_round(&self) -> Duration {
        Duration::from_secs(self.quiz_round_secs)
    }
}

/// Support pointers
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SupportConfig {
    /// Invite to the support server
    pub server_url: String,
}

impl Default for SupportConfig {
    fn default() -> Self {
        Self {
            server_url: "https://discord.gg/4tVQHtf".to_string(),
        }
    }
}

impl AppConfig {
    /// Rejects settings that would break the bot at runtime.
    pub fn validate(&self) -> Result<()> {
        let timeouts = [
            ("sessions.idle_timeout_secs", self.sessions.idle_timeout_secs),
            ("sessions.confirm_timeout_secs", self.sessions.confirm_timeout_secs),
            ("sessions.quiz_round_secs", self.sessions.quiz_round_secs),
            ("lookup.request_timeout_secs", self.lookup.request_timeout_secs),
        ];
        for (name, value) in timeouts {
            if value == 0 {
                return Err(Error::Config {
                    message: format!("{name} must be greater than zero"),
                });
            }
        }
        Ok(())
    }
}

/// Parses settings from a TOML string and validates them.
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    let config: AppConfig = toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })?;
    config.validate()?;
    Ok(config)
}

/// Loads settings from `path`.
///
/// A missing file falls back to the defaults; an unreadable or malformed file is an error.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    tracing::debug!("Attempting to load configuration from: {:?}", path_ref);

    if !path_ref.exists() {
        tracing::warn!("{:?} not found, using default settings", path_ref);
        return Ok(AppConfig::default());
    }

    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {path_ref:?}: {e}"),
    })?;
    parse_config(&contents)
}

/// Loads settings from `AM4_CONFIG` or [`DEFAULT_CONFIG_PATH`].
pub fn load_default_config() -> Result<AppConfig> {
    let path = std::env::var("AM4_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    load_config(path)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.sessions.idle_timeout_secs, 600);
        assert_eq!(config.sessions.confirm_timeout(), Duration::from_secs(60));
        assert_eq!(config.charts.base_url, "https://quickchart.io");
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() {
        let toml_str = r#"
            [api]
            base_url = "http://localhost:9000/api"

            [sessions]
            idle_timeout_secs = 300
        "#;

        let config = parse_config(toml_str).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:9000/api");
        assert_eq!(config.sessions.idle_timeout(), Duration::from_secs(300));
        assert_eq!(config.sessions.quiz_round_secs, 30);
        assert_eq!(config.lookup.qr_url, "https://api.qrserver.com");
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let result = parse_config("[sessions]\nidle_timeout_secs = 0\n");
        assert!(matches!(result, Err(Error::Config { message: _ })));
    }

    #[test]
    fn test_zero_lookup_timeout_is_rejected() {
        let result = parse_config("[lookup]\nrequest_timeout_secs = 0\n");
        assert!(matches!(result, Err(Error::Config { message }) if message.starts_with("lookup.")));
    }

    #[test]
    fn test_malformed_config_is_rejected() {
        let result = parse_config("[sessions\nidle_timeout_secs = ");
        assert!(matches!(result, Err(Error::Config { message: _ })));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = load_config("definitely/not/here/config.toml").unwrap();
        assert_eq!(config.support.server_url, SupportConfig::default().server_url);
    }
}

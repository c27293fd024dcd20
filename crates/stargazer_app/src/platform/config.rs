use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;
use stargazer_engine::GatewaySettings;

use super::logging::LogDestination;

pub const DEFAULT_CONFIG_FILE: &str = "stargazer.ron";
pub const API_KEY_ENV: &str = "NASA_API_KEY";

/// Where a loaded [`AppConfig`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigOrigin {
    File,
    Defaults,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub log: LogConfig,
}

/// `api` section: where requests go and how long they may take.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_key: String,
    pub rover: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub destination: LogDestination,
    pub level: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        let defaults = GatewaySettings::default();
        Self {
            base_url: defaults.base_url,
            api_key: defaults.api_key,
            rover: defaults.rover,
            connect_timeout_secs: defaults.connect_timeout.as_secs(),
            request_timeout_secs: defaults.request_timeout.as_secs(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            destination: LogDestination::Terminal,
            level: "warn".to_string(),
        }
    }
}

impl AppConfig {
    /// Reads a RON config file; a missing file yields the built-in defaults.
    ///
    /// Runs before the logger exists, so the caller logs the origin.
    pub fn load(path: &Path) -> anyhow::Result<(Self, ConfigOrigin)> {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok((Self::default(), ConfigOrigin::Defaults));
            }
            Err(err) => {
                return Err(err).with_context(|| format!("reading config {}", path.display()))
            }
        };
        let config = ron::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok((config, ConfigOrigin::File))
    }

    /// Applies the environment key, then explicit command-line values.
    pub fn with_overrides(
        mut self,
        env_api_key: Option<String>,
        cli_api_key: Option<String>,
        cli_log_level: Option<String>,
    ) -> Self {
        let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());
        if let Some(key) = non_empty(cli_api_key).or_else(|| non_empty(env_api_key)) {
            self.api.api_key = key;
        }
        if let Some(level) = non_empty(cli_log_level) {
            self.log.level = level;
        }
        self
    }

    pub fn gateway_settings(&self) -> GatewaySettings {
        GatewaySettings {
            base_url: self.api.base_url.clone(),
            api_key: self.api.api_key.clone(),
            rover: self.api.rover.clone(),
            connect_timeout: Duration::from_secs(self.api.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.api.request_timeout_secs),
        }
    }
}

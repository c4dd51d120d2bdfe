//! Configuration layer: typed settings with layered precedence (file → env).
//!
//! Environment variables use the `FABRICA` prefix with `__` as the
//! section separator, e.g. `FABRICA__API__MODE=production`,
//! `FABRICA__API__PRODUCTION_URL=https://api.fabrica.example`.

use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;

use crate::cache::CacheConfig;

const LOCAL_CONFIG_BASENAME: &str = "fabrica";
const DEFAULT_PRODUCTION_URL: &str = "https://api.fabrica.example";
const DEFAULT_DEVELOPMENT_URL: &str = "http://127.0.0.1:4000";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to load configuration")]
    Load(#[from] config::ConfigError),
    #[error("invalid log level `{0}`")]
    InvalidLogLevel(String),
}

/// Which backend the client talks to.
///
/// Two separate URL variables exist so that switching the mode flag
/// never requires editing a URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiMode {
    Production,
    #[default]
    Development,
}

impl std::str::FromStr for ApiMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(ApiMode::Production),
            "development" | "dev" => Ok(ApiMode::Development),
            other => Err(format!("unknown api mode `{other}`")),
        }
    }
}

/// Backend endpoint selection.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    pub mode: ApiMode,
    pub production_url: String,
    pub development_url: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            mode: ApiMode::default(),
            production_url: DEFAULT_PRODUCTION_URL.to_string(),
            development_url: DEFAULT_DEVELOPMENT_URL.to_string(),
        }
    }
}

impl ApiSettings {
    /// The base URL selected by the current mode.
    pub fn base_url(&self) -> &str {
        match self.mode {
            ApiMode::Production => &self.production_url,
            ApiMode::Development => &self.development_url,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    #[default]
    Compact,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    level: String,
    pub format: LogFormat,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl LoggingSettings {
    pub fn level(&self) -> Result<LevelFilter, SettingsError> {
        self.level
            .parse()
            .map_err(|_| SettingsError::InvalidLogLevel(self.level.clone()))
    }
}

/// Top-level settings for the SDK and the admin CLI.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api: ApiSettings,
    pub cache: CacheConfig,
    pub logging: LoggingSettings,
}

impl Settings {
    /// Load settings from an optional `fabrica.toml` next to the
    /// process, overridden by `FABRICA_*` environment variables.
    pub fn load() -> Result<Self, SettingsError> {
        Self::from_sources(Some(LOCAL_CONFIG_BASENAME))
    }

    fn from_sources(file_basename: Option<&str>) -> Result<Self, SettingsError> {
        let mut builder = Config::builder();
        if let Some(basename) = file_basename {
            builder = builder.add_source(File::with_name(basename).required(false));
        }
        // try_parsing lets numeric and boolean overrides (cache TTLs,
        // enable flags) come in from the environment as typed values.
        let config = builder
            .add_source(
                Environment::with_prefix("FABRICA")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        Ok(config.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_select_development_url() {
        let settings = Settings::default();
        assert_eq!(settings.api.mode, ApiMode::Development);
        assert_eq!(settings.api.base_url(), DEFAULT_DEVELOPMENT_URL);
    }

    #[test]
    fn production_mode_switches_base_url() {
        let api = ApiSettings {
            mode: ApiMode::Production,
            ..ApiSettings::default()
        };
        assert_eq!(api.base_url(), DEFAULT_PRODUCTION_URL);
    }

    #[test]
    fn mode_parses_short_forms() {
        assert_eq!("prod".parse::<ApiMode>().unwrap(), ApiMode::Production);
        assert_eq!("dev".parse::<ApiMode>().unwrap(), ApiMode::Development);
        assert!("staging".parse::<ApiMode>().is_err());
    }

    #[test]
    fn invalid_log_level_is_reported() {
        let logging = LoggingSettings {
            level: "chatty".to_string(),
            format: LogFormat::Compact,
        };
        assert!(matches!(
            logging.level(),
            Err(SettingsError::InvalidLogLevel(_))
        ));
    }

    #[test]
    fn default_log_level_parses() {
        let logging = LoggingSettings::default();
        assert_eq!(logging.level().unwrap(), LevelFilter::INFO);
    }
}

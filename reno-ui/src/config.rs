//! Application settings loaded from `renovation.toml`.
//!
//! Every key is optional. Command-line flags are layered on top with
//! [`AppConfig::apply_overrides`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use reno_core::store::StoreConfig;
use reno_gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL, GeminiConfig};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "renovation.toml";

/// Consulted when the configured key variable is unset.
pub const FALLBACK_API_KEY_ENV: &str = "API_KEY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub backend: String,
    /// Database file, or `:memory:`.
    pub location: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: StoreConfig::SQLITE.to_string(),
            location: "renovation.db".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    pub model: String,
    pub base_url: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    pub timeout_secs: u64,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            timeout_secs: 60,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Starting folder for the save dialog.
    pub directory: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub storage: StorageSettings,
    pub analysis: AnalysisSettings,
    pub export: ExportSettings,
    pub logging: LoggingSettings,
}

/// Values given on the command line; `None` keeps the file's setting.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub backend: Option<String>,
    pub db: Option<String>,
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
}

impl AppConfig {
    /// Reads `path`, or [`DEFAULT_CONFIG_FILE`] when `path` is `None`.
    ///
    /// A missing default file yields the defaults. A missing explicit file
    /// is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if !required && e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file; using defaults");
                return Ok(Self::default());
            }
            Err(source) => return Err(ConfigError::Read { path, source }),
        };

        Self::parse(&text).map_err(|source| ConfigError::Parse { path, source })
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(backend) = overrides.backend {
            self.storage.backend = backend;
        }
        if let Some(db) = overrides.db {
            self.storage.location = db;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if let Some(file) = overrides.log_file {
            self.logging.file = Some(file);
        }
    }

    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::from_settings(&self.storage.backend, &self.storage.location)
    }

    /// Gateway settings, reading the API key through `lookup` (normally
    /// `std::env::var`).
    pub fn gemini_config(&self, lookup: impl Fn(&str) -> Option<String>) -> GeminiConfig {
        let api_key = lookup(&self.analysis.api_key_env)
            .filter(|key| !key.trim().is_empty())
            .or_else(|| lookup(FALLBACK_API_KEY_ENV));

        let config = GeminiConfig::default()
            .with_model(self.analysis.model.clone())
            .with_base_url(self.analysis.base_url.clone())
            .with_timeout(Duration::from_secs(self.analysis.timeout_secs));
        match api_key {
            Some(key) => config.with_api_key(key),
            None => config,
        }
    }
}

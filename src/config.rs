use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::generation::OrchestratorConfig;
use crate::core::strategy::{ProviderId, ProviderRegistry, UnknownProvider};

/// Errors reading or interpreting configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid provider in [providers].disabled: {0}")]
    Provider(#[from] UnknownProvider),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub orchestrator: OrchestratorSettings,
    pub providers: ProviderSettings,
    pub logging: LoggingSettings,
}

/// Per-call timeouts and fallback behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrchestratorSettings {
    /// Timeout in seconds for each generation provider call.
    pub generation_timeout_secs: u64,
    /// Timeout in seconds for each enrichment call.
    pub enrichment_timeout_secs: u64,
    /// Advance to backup providers when one fails.
    pub enable_fallback: bool,
}

/// Which providers this process may use.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    /// Provider ids to leave out of the registry, e.g. `["dalle", "newsapi"]`.
    pub disabled: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Filter used when `RUST_LOG` is unset.
    pub default_filter: String,
    /// Override the default log directory.
    pub log_dir: Option<PathBuf>,
}

impl Default for OrchestratorSettings {
    fn default() -> Self {
        let defaults = OrchestratorConfig::default();
        Self {
            generation_timeout_secs: defaults.generation_timeout.as_secs(),
            enrichment_timeout_secs: defaults.enrichment_timeout.as_secs(),
            enable_fallback: defaults.enable_fallback,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            default_filter: "info,lessonsmith=debug".to_string(),
            log_dir: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from `~/.config/lessonsmith/config.toml`.
    /// Returns `Default` if the file is missing or unparseable.
    pub fn load() -> Self {
        let config_path = Self::config_path();
        if !config_path.exists() {
            log::debug!("No config file at {}, using defaults", config_path.display());
            return Self::default();
        }

        match Self::load_from(&config_path) {
            Ok(config) => {
                log::info!("Loaded config from {}", config_path.display());
                config
            }
            Err(e) => {
                log::warn!("{e}; using defaults");
                Self::default()
            }
        }
    }

    /// Load and parse a specific file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Orchestrator settings as runtime configuration.
    pub fn orchestrator_config(&self) -> Result<OrchestratorConfig, ConfigError> {
        let settings = &self.orchestrator;
        for (field, value) in [
            ("orchestrator.generation_timeout_secs", settings.generation_timeout_secs),
            ("orchestrator.enrichment_timeout_secs", settings.enrichment_timeout_secs),
        ] {
            if value == 0 {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    reason: "must be at least 1 second".to_string(),
                });
            }
        }

        Ok(OrchestratorConfig {
            generation_timeout: Duration::from_secs(settings.generation_timeout_secs),
            enrichment_timeout: Duration::from_secs(settings.enrichment_timeout_secs),
            enable_fallback: settings.enable_fallback,
        })
    }

    /// Registry of every known provider minus the disabled ones.
    pub fn provider_registry(&self) -> Result<ProviderRegistry, ConfigError> {
        let disabled = self
            .providers
            .disabled
            .iter()
            .map(|id| id.parse::<ProviderId>())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ProviderRegistry::all().without(disabled))
    }

    /// Resolved log directory (override or XDG default).
    pub fn log_dir(&self) -> PathBuf {
        self.logging.log_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|d| d.join("lessonsmith").join("logs"))
                .unwrap_or_else(|| PathBuf::from("logs"))
        })
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("lessonsmith").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}

use crate::providers::ubci_provider::DEFAULT_BASE_URL;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

const CACHE_FILE_NAME: &str = "ubci_index_cache.json";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct UbciProviderConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    pub ubci: Option<UbciProviderConfig>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            ubci: Some(UbciProviderConfig {
                base_url: DEFAULT_BASE_URL.to_string(),
            }),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct LogConfig {
    /// `off`, `error`, `warn`, `info`, `debug` or `trace`. Unset means off.
    pub level: Option<String>,
    pub file: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub providers: ProvidersConfig,
    pub cache_path: Option<String>,
    #[serde(default)]
    pub log: LogConfig,
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "ubcindex", "ubci").context("Could not determine project directories")
}

impl AppConfig {
    /// Loads the default config file, falling back to defaults when it does
    /// not exist.
    pub fn load_or_default() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        Ok(project_dirs()?.config_dir().join("config.yaml"))
    }

    pub fn base_url(&self) -> &str {
        self.providers
            .ubci
            .as_ref()
            .map_or(DEFAULT_BASE_URL, |p| &p.base_url)
    }

    pub fn cache_file_path(&self) -> Result<PathBuf> {
        if let Some(custom_path) = &self.cache_path {
            return Ok(PathBuf::from(custom_path));
        }
        Ok(project_dirs()?.config_dir().join(CACHE_FILE_NAME))
    }

    pub fn log_dir() -> Result<PathBuf> {
        Ok(project_dirs()?.config_dir().join("logs"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}

use std::{
    env, fs, io,
    path::{Path, PathBuf},
};

use dirs_next::config_dir;
use hashdash_util::expand_tilde;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Overrides the location of the config file.
pub const CONFIG_PATH_ENV: &str = "HASHDASH_CONFIG_PATH";
/// Overrides the catalog file for one run.
pub const CATALOG_PATH_ENV: &str = "HASHDASH_CATALOG_PATH";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// User settings read from `config.json`. Every field is optional; a missing
/// file yields the defaults.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DashboardConfig {
    /// Replaces the GraphQL endpoint; `HASHRATE_INDEX_API_BASE` wins over it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    /// Catalog file used instead of the embedded one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<PathBuf>,
    /// Per-request timeout in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl DashboardConfig {
    /// Loads the default config file. Unreadable or malformed files are
    /// logged and replaced by the defaults.
    pub fn load() -> Self {
        let path = default_config_path();
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(error) => {
                warn!(%error, "ignoring config file");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file; using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let mut config: Self = serde_json::from_str(&content).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        config.catalog_path = config
            .catalog_path
            .map(|catalog| expand_tilde(&catalog.to_string_lossy()));
        Ok(config)
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&default_config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_error = |source: io::Error| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        let content = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, content).map_err(io_error)
    }
}

/// Location of the config file: `HASHDASH_CONFIG_PATH` when set, otherwise
/// `<config dir>/hashdash/config.json`.
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = env::var(CONFIG_PATH_ENV)
        && !path.trim().is_empty()
    {
        return expand_tilde(&path);
    }

    config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("hashdash")
        .join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = DashboardConfig::load_from(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, DashboardConfig::default());
    }

    #[test]
    fn save_then_load_preserves_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = DashboardConfig {
            api_base: Some("http://localhost:4000/graphql".into()),
            catalog_path: Some(PathBuf::from("/tmp/catalog.yaml")),
            timeout_secs: Some(5),
        };
        config.save_to(&path).unwrap();
        assert_eq!(DashboardConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn malformed_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(DashboardConfig::load_from(&path), Err(ConfigError::Json { .. })));
    }

    #[test]
    fn env_override_selects_config_path() {
        temp_env::with_var(CONFIG_PATH_ENV, Some("/tmp/hashdash-test/config.json"), || {
            assert_eq!(default_config_path(), PathBuf::from("/tmp/hashdash-test/config.json"));
        });
    }
}

//! Settings loader

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::database;
use crate::error::{ConfigError, SgsError};

use super::ScannerSettings;

/// Settings file looked up in the working directory
pub const SETTINGS_FILENAME: &str = ".semgrep-search.toml";

/// Main settings structure
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct Settings {
    /// Rule database location
    #[serde(default)]
    pub database: Option<PathBuf>,

    /// Default output base name for scanner results
    #[serde(default)]
    pub output: Option<String>,

    /// Keep the generated ruleset after a run
    #[serde(default)]
    pub keep_rules_file: bool,

    /// Scanner configuration
    #[serde(default)]
    pub scanner: ScannerSettings,
}

impl Settings {
    /// Load settings from `path` if given, otherwise from the default file
    /// when it exists, otherwise return the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, SgsError> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_path = Path::new(SETTINGS_FILENAME);
                if default_path.exists() {
                    Self::load_from_file(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load settings from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self, SgsError> {
        let content = fs::read_to_string(path).map_err(|e| {
            SgsError::Config(ConfigError::FileRead {
                path: path.display().to_string(),
                source: e,
            })
        })?;

        debug!("Loaded settings from {}", path.display());
        toml::from_str(&content).map_err(Into::into)
    }

    /// Database location, falling back to the cache directory
    pub fn database_path(&self, override_path: Option<&Path>) -> PathBuf {
        override_path
            .map(Path::to_path_buf)
            .or_else(|| self.database.clone())
            .unwrap_or_else(database::default_path)
    }
}

//! Backend connection settings.
//!
//! Settings load from `settings.toml` under the `.revlens` directory, with a
//! `REVLENS_API_URL` environment override taking precedence. A missing file
//! falls back to defaults so a fresh install works against a local backend.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::app_dirs;

/// Backend used when nothing is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Persisted application settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the analysis backend, without a trailing slash.
    pub api_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

/// Errors raised while loading or validating settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to resolve settings location: {0}")]
    Dir(#[from] app_dirs::AppDirError),
    #[error("Failed to read settings file {path}: {source}")]
    Read {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse settings file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid api_url {url:?}: {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },
}

impl Settings {
    /// Load settings from disk, apply the environment override, and validate.
    pub fn load() -> Result<Self, ConfigError> {
        let path = app_dirs::settings_path()?;
        let mut settings = Self::load_from(&path)?;
        if let Ok(url) = std::env::var("REVLENS_API_URL") {
            settings.api_url = url;
        }
        settings.api_url = settings.api_url.trim_end_matches('/').to_string();
        settings.validate()?;
        Ok(settings)
    }

    fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(raw) => Ok(toml::from_str(&raw)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        Url::parse(&self.api_url).map_err(|source| ConfigError::InvalidUrl {
            url: self.api_url.clone(),
            source,
        })?;
        Ok(())
    }
}

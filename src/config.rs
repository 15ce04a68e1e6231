//! Configuration for linkstore

use crate::graph::vocab::server;
use crate::resource::InteractionModel;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors loading or writing configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid base URL {0}: must be absolute http(s)")]
    BaseUrl(String),
}

/// Default data directory
pub fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("linkstore")
}

/// Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Public URL resource paths are appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// SQLite database file
    #[serde(default = "default_database")]
    pub database: PathBuf,

    /// Directory for binary content
    #[serde(default = "default_binary_dir")]
    pub binary_dir: PathBuf,

    /// Agent recorded in audit history when none is given
    #[serde(default = "default_agent")]
    pub agent: String,

    /// Interaction models the store accepts
    #[serde(default = "default_interaction_models")]
    pub interaction_models: Vec<InteractionModel>,
}

fn default_base_url() -> String {
    "http://localhost:8080/".to_string()
}

fn default_database() -> PathBuf {
    default_data_dir().join("linkstore.db")
}

fn default_binary_dir() -> PathBuf {
    default_data_dir().join("binaries")
}

fn default_agent() -> String {
    server::ANONYMOUS_AGENT.to_string()
}

fn default_interaction_models() -> Vec<InteractionModel> {
    InteractionModel::ALL.to_vec()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            database: default_database(),
            binary_dir: default_binary_dir(),
            agent: default_agent(),
            interaction_models: default_interaction_models(),
        }
    }
}

impl Config {
    /// Read a YAML file; absent fields take their defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&text)
    }

    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_database(mut self, database: impl Into<PathBuf>) -> Self {
        self.database = database.into();
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::BaseUrl(self.base_url.clone()));
        }
        Ok(())
    }
}

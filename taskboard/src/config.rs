//! Configuration for embedding the board engine
//!
//! Sources are merged in precedence order (later sources override earlier ones):
//! 1. Default values
//! 2. `taskboard.toml`, `taskboard.yaml`, `taskboard.json` in the given directory
//! 3. Environment variables with the `TASKBOARD_` prefix (`TASKBOARD_STORAGE_KEY`, ...)

use crate::error::{BoardError, Result};
use crate::persistence::{Persistence, STORAGE_KEY};
use crate::storage::FileStorage;
use crate::types::{AppState, DEFAULT_USER};
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// File name, without extension, of the configuration files
pub const CONFIG_FILE_STEM: &str = "taskboard";

/// Prefix of configuration environment variables
pub const ENV_PREFIX: &str = "TASKBOARD_";

/// Where and under which key the state lives, and who the first user is
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Directory holding the state file. Relative paths are resolved against
    /// the directory the configuration was loaded from.
    pub storage_dir: PathBuf,
    /// Storage key; the state file is `<storage_dir>/<storage_key>.json`
    pub storage_key: String,
    /// Current user of a freshly created state
    pub default_user: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(".taskboard"),
            storage_key: STORAGE_KEY.to_string(),
            default_user: DEFAULT_USER.to_string(),
        }
    }
}

impl BoardConfig {
    /// Build the figment for `dir` with all sources in precedence order
    pub fn figment(dir: impl AsRef<Path>) -> Figment {
        let dir = dir.as_ref();
        Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(dir.join(format!("{CONFIG_FILE_STEM}.toml"))))
            .merge(Yaml::file(dir.join(format!("{CONFIG_FILE_STEM}.yaml"))))
            .merge(Json::file(dir.join(format!("{CONFIG_FILE_STEM}.json"))))
            .merge(Env::prefixed(ENV_PREFIX).map(|key| key.as_str().to_lowercase().into()))
    }

    /// Load and validate the configuration for `dir`
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let mut config: Self = Self::figment(dir).extract()?;
        if config.storage_dir.is_relative() {
            config.storage_dir = dir.join(&config.storage_dir);
        }
        config.validate()?;

        debug!(
            storage_dir = %config.storage_dir.display(),
            storage_key = %config.storage_key,
            "loaded board configuration"
        );
        Ok(config)
    }

    /// Reject values the storage layer cannot use
    pub fn validate(&self) -> Result<()> {
        if self.storage_key.trim().is_empty() {
            return Err(BoardError::invalid_value("storage_key", "must not be empty"));
        }
        if self.storage_key.contains(['/', '\\']) || self.storage_key.starts_with('.') {
            return Err(BoardError::invalid_value(
                "storage_key",
                format!("'{}' must be a plain file name", self.storage_key),
            ));
        }
        if self.default_user.trim().is_empty() {
            return Err(BoardError::invalid_value("default_user", "must not be empty"));
        }
        Ok(())
    }

    /// File storage rooted at `storage_dir`
    pub fn file_storage(&self) -> FileStorage {
        FileStorage::new(&self.storage_dir)
    }

    /// Persistence over [`file_storage`](Self::file_storage) with the configured key and user
    pub fn persistence(&self) -> Persistence {
        Persistence::new(Arc::new(self.file_storage()))
            .with_key(self.storage_key.clone())
            .with_default_user(self.default_user.clone())
    }

    /// Empty state for the configured user
    pub fn initial_state(&self) -> AppState {
        AppState::with_user(self.default_user.clone())
    }
}

//! Mirrors [`AppState`] to a blob store as JSON.
//!
//! The blob layout is `{"boards": [...], "currentUser": "..."}` with
//! camelCase fields throughout. Timestamps are written as RFC 3339 and read
//! back leniently (see [`crate::types::timestamp`]). Decoded states are
//! normalized, so `load(save(s)) == s` holds for every normalized `s`.

use crate::error::{BoardError, Result};
use crate::storage::StateStorage;
use crate::types::{AppState, DEFAULT_USER};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Storage key used unless configured otherwise
pub const STORAGE_KEY: &str = "task-board-app";

/// Load/save adapter between the state and a [`StateStorage`]
#[derive(Clone)]
pub struct Persistence {
    storage: Arc<dyn StateStorage>,
    key: String,
    default_user: String,
}

impl std::fmt::Debug for Persistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Persistence")
            .field("key", &self.key)
            .field("default_user", &self.default_user)
            .finish_non_exhaustive()
    }
}

impl Persistence {
    /// Create a persistence adapter over `storage` using [`STORAGE_KEY`]
    pub fn new(storage: Arc<dyn StateStorage>) -> Self {
        Self {
            storage,
            key: STORAGE_KEY.to_string(),
            default_user: DEFAULT_USER.to_string(),
        }
    }

    /// Set the storage key
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Set the user of the state returned when nothing can be loaded
    pub fn with_default_user(mut self, user: impl Into<String>) -> Self {
        self.default_user = user.into();
        self
    }

    /// Get the storage key
    pub fn key(&self) -> &str {
        &self.key
    }

    /// State used when there is nothing to load
    pub fn default_state(&self) -> AppState {
        AppState::with_user(self.default_user.clone())
    }

    /// Read and decode the stored state. `Ok(None)` if nothing was stored.
    pub async fn try_load(&self) -> Result<Option<AppState>> {
        match self.storage.read_blob(&self.key).await? {
            Some(blob) => decode(&blob).map(Some),
            None => Ok(None),
        }
    }

    /// Read the stored state, falling back to the default state when the
    /// blob is absent or cannot be decoded. Never fails.
    pub async fn load(&self) -> AppState {
        match self.try_load().await {
            Ok(Some(state)) => {
                debug!(key = %self.key, boards = state.boards.len(), "loaded state");
                state
            }
            Ok(None) => {
                debug!(key = %self.key, "no stored state, starting empty");
                self.default_state()
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "stored state unreadable, starting empty");
                self.default_state()
            }
        }
    }

    /// Encode and write the state
    pub async fn try_save(&self, state: &AppState) -> Result<()> {
        let blob = encode(state)?;
        self.storage.write_blob(&self.key, &blob).await
    }

    /// Write the state, logging failures instead of returning them
    pub async fn save(&self, state: &AppState) {
        if let Err(e) = self.try_save(state).await {
            error!(key = %self.key, error = %e, "failed to save state");
        }
    }
}

/// Serialize a state to its blob form
pub fn encode(state: &AppState) -> Result<String> {
    Ok(serde_json::to_string(state)?)
}

/// Parse a blob and normalize the result. A blob that repeats a board,
/// column or task id is rejected like one that does not parse.
pub fn decode(blob: &str) -> Result<AppState> {
    let mut state: AppState = serde_json::from_str(blob)
        .map_err(|e| BoardError::parse(format!("stored state: {e}")))?;
    state.normalize();
    state.ensure_unique_ids()?;
    Ok(state)
}

//! Persistence contract for picker selections.
//!
//! Stores are a narrow key-value surface; the bridge functions here downgrade
//! every store failure to a logged warning so persistence can never break the
//! picker itself.

pub mod json_store;
pub mod memory;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error raised by settings stores.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Abstraction over key-value stores capable of persisting picker selections.
pub trait SettingsStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<S: SettingsStore + ?Sized> SettingsStore for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

/// Flattened selection written through a [`SettingsStore`].
///
/// Carries identifiers only, so a round-trip survives catalog changes and is
/// revalidated against the current catalog on load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PersistedSelection {
    pub model: String,
    pub palette: String,
    pub portrait: bool,
    pub dark_mode: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

/// Reads the persisted selection under `key`.
///
/// Read or parse failures are logged and reported as "nothing persisted".
pub fn load_selection(store: &dyn SettingsStore, key: &str) -> Option<PersistedSelection> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(err) => {
            tracing::warn!("failed to read persisted selection `{key}`: {err}");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(record) => Some(record),
        Err(err) => {
            tracing::warn!("ignoring malformed persisted selection `{key}`: {err}");
            None
        }
    }
}

/// Writes the persisted selection under `key`, logging a warning on failure.
pub fn save_selection(store: &dyn SettingsStore, key: &str, record: &PersistedSelection) {
    let payload = match serde_json::to_string(record) {
        Ok(payload) => payload,
        Err(err) => {
            tracing::warn!("failed to serialize selection `{key}`: {err}");
            return;
        }
    };

    if let Err(err) = store.set(key, &payload) {
        tracing::warn!("failed to persist selection `{key}`: {err}");
    }
}

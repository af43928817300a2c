//! In-memory settings store for tests and embedders that manage persistence
//! themselves.

use std::{collections::HashMap, sync::RwLock};

use super::{SettingsStore, StoreError};

#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a raw value, mainly for tests.
    pub fn insert(&self, key: impl Into<String>, value: impl Into<String>) {
        self.values
            .write()
            .expect("MemoryStore lock poisoned")
            .insert(key.into(), value.into());
    }

    /// Raw stored value under `key`, mainly for assertions.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.values
            .read()
            .expect("MemoryStore lock poisoned")
            .get(key)
            .cloned()
    }
}

impl SettingsStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self
            .values
            .read()
            .expect("MemoryStore lock poisoned")
            .get(key)
            .cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.insert(key, value);
        Ok(())
    }
}

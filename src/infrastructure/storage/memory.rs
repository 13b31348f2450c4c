// src/infrastructure/storage/memory.rs
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::KeyValueStore;
use crate::domain::errors::{StorageError, StorageResult};

/// Process-local store. Clones share the same slots.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn slots(&self) -> StorageResult<MutexGuard<'_, HashMap<String, String>>> {
        self.slots
            .lock()
            .map_err(|e| StorageError::Backend(format!("memory store lock poisoned: {}", e)))
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.slots()?.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> StorageResult<()> {
        self.slots()?.insert(key.to_string(), value);
        Ok(())
    }
}

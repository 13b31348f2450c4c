// src/infrastructure/repository/collection.rs
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

use crate::domain::errors::StorageResult;
use crate::infrastructure::storage::KeyValueStore;

/// A whole collection of records serialized as one JSON array under one key.
///
/// Every write replaces the full array. Callers that read, modify and write
/// back must hold [`JsonCollection::lock`] for the whole sequence.
pub struct JsonCollection<T> {
    store: Arc<dyn KeyValueStore>,
    key: String,
    write_lock: Mutex<()>,
    _records: PhantomData<fn() -> T>,
}

impl<T> JsonCollection<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(store: Arc<dyn KeyValueStore>, key: &str) -> Self {
        Self {
            store,
            key: key.to_string(),
            write_lock: Mutex::new(()),
            _records: PhantomData,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Serialize writers of this collection
    pub async fn lock(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().await
    }

    /// `None` when the slot has never been written
    pub async fn load(&self) -> StorageResult<Option<Vec<T>>> {
        match self.store.get(&self.key).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    pub async fn save(&self, records: &[T]) -> StorageResult<()> {
        let raw = serde_json::to_string(records)?;
        self.store.set(&self.key, raw).await
    }
}

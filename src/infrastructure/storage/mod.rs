// src/infrastructure/storage/mod.rs
// Local key-value storage backends

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use async_trait::async_trait;

use crate::domain::errors::StorageResult;

/// Named slots holding serialized values.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Value stored under `key`, or `None` if the slot was never written
    async fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Replace the value stored under `key`
    async fn set(&self, key: &str, value: String) -> StorageResult<()>;
}

mod memory;
mod schema;
mod sqlite;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;

pub use memory::MemoryKvStore;
pub use sqlite::SqliteKvStore;

/// Durable blob storage addressed by string keys.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Overwrite whatever is stored under `key`.
    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()>;
}

#[async_trait]
impl<'a, T: KeyValueStore + ?Sized> KeyValueStore for &'a T {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()> {
        (**self).set(key, value).await
    }
}

#[async_trait]
impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()> {
        (**self).set(key, value).await
    }
}

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use async_trait::async_trait;

/// Key-value slot store backing the catalog and the session.
///
/// A slot holds one serialized document. Writes replace the whole value.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn get_slot(&self, key: &str) -> Result<Option<String>>;
    async fn put_slot(&self, key: &str, value: &str) -> Result<()>;
    async fn remove_slot(&self, key: &str) -> Result<()>;
}

#[async_trait]
impl<S: Storage + ?Sized> Storage for Arc<S> {
    async fn get_slot(&self, key: &str) -> Result<Option<String>> { (**self).get_slot(key).await }
    async fn put_slot(&self, key: &str, value: &str) -> Result<()> { (**self).put_slot(key, value).await }
    async fn remove_slot(&self, key: &str) -> Result<()> { (**self).remove_slot(key).await }
}

/// In-process slot store; clones share the same slots.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    slots: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self { Self::default() }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.slots.lock().map_err(|_| anyhow!("memory storage lock poisoned"))
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn get_slot(&self, key: &str) -> Result<Option<String>> { Ok(self.lock()?.get(key).cloned()) }

    async fn put_slot(&self, key: &str, value: &str) -> Result<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove_slot(&self, key: &str) -> Result<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}

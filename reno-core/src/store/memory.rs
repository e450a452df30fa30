use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::factory::{SlotStoreFactory, StoreConfig};
use super::slot_store::{SlotStore, StoreError};

/// Process-local store. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemorySlotStore {
    slots: Mutex<HashMap<String, String>>,
}

impl MemorySlotStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, StoreError> {
        self.slots
            .lock()
            .map_err(|e| StoreError::Database(format!("memory store poisoned: {e}")))
    }
}

#[async_trait]
impl SlotStore for MemorySlotStore {
    async fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.lock()?.get(key).cloned())
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.lock()?.remove(key);
        Ok(())
    }
}

/// Registers [`MemorySlotStore`] as the `"memory"` backend.
pub struct MemorySlotStoreFactory;

#[async_trait]
impl SlotStoreFactory for MemorySlotStoreFactory {
    fn backend_name(&self) -> &'static str {
        StoreConfig::MEMORY
    }

    fn keeps_files(&self) -> bool {
        false
    }

    async fn open(&self, _location: Option<&Path>) -> Result<Arc<dyn SlotStore>, StoreError> {
        Ok(Arc::new(MemorySlotStore::new()))
    }
}

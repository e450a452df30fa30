use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use reno_core::store::{IN_MEMORY_LOCATION, SlotStore, SlotStoreFactory, StoreConfig, StoreError};

use crate::store::SqliteSlotStore;

/// Registers [`SqliteSlotStore`] as the `"sqlite"` backend.
///
/// ```rust,no_run
/// use reno_core::store::{StoreConfig, StoreRegistry};
/// use reno_db_sqlite::SqliteSlotStoreFactory;
///
/// # async fn open() -> Result<(), reno_core::StoreError> {
/// let mut registry = StoreRegistry::new();
/// registry.register(Box::new(SqliteSlotStoreFactory));
/// let _persistence = registry.open(&StoreConfig::sqlite("renovation.db")).await?;
/// # Ok(())
/// # }
/// ```
pub struct SqliteSlotStoreFactory;

#[async_trait]
impl SlotStoreFactory for SqliteSlotStoreFactory {
    fn backend_name(&self) -> &'static str {
        StoreConfig::SQLITE
    }

    /// Opens the file, creating it if missing, and migrates its schema.
    /// Without a location the database lives in memory.
    async fn open(&self, location: Option<&Path>) -> Result<Arc<dyn SlotStore>, StoreError> {
        let path = match location {
            Some(path) => path.to_str().ok_or_else(|| {
                StoreError::Configuration(format!(
                    "sqlite slot store path is not valid UTF-8: {}",
                    path.display()
                ))
            })?,
            None => IN_MEMORY_LOCATION,
        };
        let store = SqliteSlotStore::open(path).await?;
        store.run_migrations().await?;
        Ok(Arc::new(store))
    }
}

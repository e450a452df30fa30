//! Picking the slot store at startup.
//!
//! Storage crates register a [`SlotStoreFactory`] under a short name; the
//! application turns its settings into a [`StoreConfig`] and asks the
//! [`StoreRegistry`] for a ready [`Persistence`].

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::persistence::Persistence;
use super::slot_store::{SlotStore, StoreError};

/// Settings value meaning "no file".
pub const IN_MEMORY_LOCATION: &str = ":memory:";

/// Which slot store holds the property and estimate, and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Name the backend's factory is registered under.
    pub backend: String,
    /// File holding both slots. `None` keeps them only until the process exits.
    pub location: Option<PathBuf>,
}

impl StoreConfig {
    pub const MEMORY: &'static str = "memory";
    pub const SQLITE: &'static str = "sqlite";

    pub fn memory() -> Self {
        Self {
            backend: Self::MEMORY.to_string(),
            location: None,
        }
    }

    pub fn sqlite(location: impl Into<PathBuf>) -> Self {
        Self {
            backend: Self::SQLITE.to_string(),
            location: Some(location.into()),
        }
    }

    /// From the `[storage]` settings, where an empty location or
    /// [`IN_MEMORY_LOCATION`] means no file.
    pub fn from_settings(backend: &str, location: &str) -> Self {
        let location = location.trim();
        Self {
            backend: backend.trim().to_ascii_lowercase(),
            location: (!location.is_empty() && location != IN_MEMORY_LOCATION)
                .then(|| PathBuf::from(location)),
        }
    }

    pub fn is_persistent(&self) -> bool {
        self.location.is_some()
    }
}

impl fmt::Display for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(path) => write!(f, "{} slot store at {}", self.backend, path.display()),
            None => write!(f, "{} slot store (not kept between runs)", self.backend),
        }
    }
}

/// Opens one kind of slot store.
#[async_trait]
pub trait SlotStoreFactory: Send + Sync {
    /// Lowercase name used in settings, e.g. `"sqlite"`.
    fn backend_name(&self) -> &'static str;

    /// False for stores that can only live in memory. The registry rejects
    /// a configured file for those instead of silently ignoring it.
    fn keeps_files(&self) -> bool {
        true
    }

    /// Opens the store at `location`, or a private in-memory one for `None`.
    async fn open(&self, location: Option<&Path>) -> Result<Arc<dyn SlotStore>, StoreError>;
}

/// Every slot store compiled into the application.
#[derive(Default)]
pub struct StoreRegistry {
    factories: BTreeMap<&'static str, Box<dyn SlotStoreFactory>>,
}

impl StoreRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Later registrations under the same name win.
    pub fn register(&mut self, factory: Box<dyn SlotStoreFactory>) {
        self.factories.insert(factory.backend_name(), factory);
    }

    /// Registered names in alphabetical order.
    pub fn backends(&self) -> Vec<&'static str> {
        self.factories.keys().copied().collect()
    }

    /// Opens the configured store and wraps it for typed slot access.
    ///
    /// # Errors
    /// * [`StoreError::Configuration`] for a name nothing is registered
    ///   under, or a file given to a memory-only store.
    /// * Whatever the backend reports while opening.
    pub async fn open(&self, config: &StoreConfig) -> Result<Persistence, StoreError> {
        let factory = self.factories.get(config.backend.as_str()).ok_or_else(|| {
            StoreError::Configuration(format!(
                "no slot store named '{}' (built in: {})",
                config.backend,
                self.backends().join(", ")
            ))
        })?;

        if let Some(path) = &config.location {
            if !factory.keeps_files() {
                return Err(StoreError::Configuration(format!(
                    "the {} slot store cannot be kept in '{}'",
                    config.backend,
                    path.display()
                )));
            }
        }

        let store = factory.open(config.location.as_deref()).await?;
        info!(store = %config, "slot store opened");
        Ok(Persistence::new(store))
    }
}

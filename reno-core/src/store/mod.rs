pub mod factory;
pub mod memory;
pub mod persistence;
pub mod slot_store;

pub use factory::{IN_MEMORY_LOCATION, SlotStoreFactory, StoreConfig, StoreRegistry};
pub use memory::{MemorySlotStore, MemorySlotStoreFactory};
pub use persistence::{Persistence, Slot};
pub use slot_store::{SlotStore, StoreError};

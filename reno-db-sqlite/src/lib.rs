mod factory;
mod store;

pub use factory::SqliteSlotStoreFactory;
pub use store::SqliteSlotStore;

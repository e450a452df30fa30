use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::slot_store::{SlotStore, StoreError};
use crate::models::{Estimate, Property, default_categories, default_property};

/// A value that lives in its own durable slot.
pub trait Slot: Serialize + DeserializeOwned {
    /// Storage key of the slot.
    const KEY: &'static str;

    /// Value used when the slot is empty or unreadable.
    fn default_value() -> Self;
}

impl Slot for Property {
    const KEY: &'static str = "propertypro_details";

    fn default_value() -> Self {
        default_property()
    }
}

impl Slot for Estimate {
    const KEY: &'static str = "propertypro_categories";

    fn default_value() -> Self {
        Estimate::new(default_categories())
    }
}

/// Typed load/save/clear over a [`SlotStore`], one JSON snapshot per slot.
#[derive(Clone)]
pub struct Persistence {
    store: Arc<dyn SlotStore>,
}

impl Persistence {
    pub fn new(store: Arc<dyn SlotStore>) -> Self {
        Self { store }
    }

    /// Loads the slot, falling back to its default.
    ///
    /// A corrupt blob or a failing backend is logged and treated as empty
    /// rather than propagated.
    pub async fn load<T: Slot>(&self) -> T {
        let blob = match self.store.read(T::KEY).await {
            Ok(Some(blob)) => blob,
            Ok(None) => {
                debug!(slot = T::KEY, "slot empty; using defaults");
                return T::default_value();
            }
            Err(error) => {
                warn!(slot = T::KEY, %error, "slot read failed; using defaults");
                return T::default_value();
            }
        };

        match serde_json::from_str(&blob) {
            Ok(value) => value,
            Err(error) => {
                warn!(slot = T::KEY, %error, "stored snapshot is corrupt; using defaults");
                T::default_value()
            }
        }
    }

    /// Serializes and writes the full value.
    pub async fn save<T: Slot>(&self, value: &T) -> Result<(), StoreError> {
        let blob =
            serde_json::to_string(value).map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.store.write(T::KEY, &blob).await?;
        debug!(slot = T::KEY, bytes = blob.len(), "slot saved");
        Ok(())
    }

    pub async fn clear<T: Slot>(&self) -> Result<(), StoreError> {
        self.store.remove(T::KEY).await
    }

    /// Clears both the property and the estimate slots.
    pub async fn clear_all(&self) -> Result<(), StoreError> {
        self.clear::<Property>().await?;
        self.clear::<Estimate>().await
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::{GarageType, ItemEdit, PropertyType};
    use crate::store::MemorySlotStore;

    fn persistence() -> (Persistence, Arc<MemorySlotStore>) {
        let store = Arc::new(MemorySlotStore::new());
        (Persistence::new(store.clone()), store)
    }

    #[tokio::test]
    async fn empty_slots_load_defaults() {
        let (p, _) = persistence();

        let estimate: Estimate = p.load().await;

        assert_eq!(estimate, Estimate::new(default_categories()));
    }

    #[tokio::test]
    async fn property_round_trips() {
        let (p, _) = persistence();
        let mut property = default_property();
        property.address = "12 Elm St".into();
        property.property_type = PropertyType::MultiFamily;
        property.garage_type = GarageType::Carport;
        property.estimated_arv = "$310,000".into();
        property.year_built = "1962".into();

        p.save(&property).await.unwrap();
        let loaded: Property = p.load().await;

        assert_eq!(loaded, property);
    }

    #[tokio::test]
    async fn estimate_round_trips_preserving_order() {
        let (p, _) = persistence();
        let mut estimate = Estimate::new(default_categories());
        estimate.apply("system", "sys-1", ItemEdit::UnitPrice(7200));
        estimate.apply("system", "sys-1", ItemEdit::Qty(1));
        estimate.apply("others", "oth-2", ItemEdit::Conditions("permit fees".into()));
        estimate.categories.reverse();

        p.save(&estimate).await.unwrap();
        let loaded: Estimate = p.load().await;

        assert_eq!(loaded, estimate);
    }

    #[tokio::test]
    async fn slots_use_fixed_keys() {
        let (p, store) = persistence();

        p.save(&default_property()).await.unwrap();
        p.save(&Estimate::new(default_categories())).await.unwrap();

        assert!(store.read("propertypro_details").await.unwrap().is_some());
        assert!(store.read("propertypro_categories").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn corrupt_blob_falls_back_to_defaults() {
        let (p, store) = persistence();
        store.write(Estimate::KEY, "{not json").await.unwrap();

        let estimate: Estimate = p.load().await;

        assert_eq!(estimate, Estimate::new(default_categories()));
    }

    #[tokio::test]
    async fn wrongly_shaped_blob_falls_back_to_defaults() {
        let (p, store) = persistence();
        store.write(Property::KEY, r#"{"address": 12}"#).await.unwrap();

        let property: Property = p.load().await;

        assert_eq!(property.address, "");
    }

    #[tokio::test]
    async fn clear_all_removes_both_slots() {
        let (p, store) = persistence();
        p.save(&default_property()).await.unwrap();
        p.save(&Estimate::new(default_categories())).await.unwrap();

        p.clear_all().await.unwrap();

        assert_eq!(store.read(Property::KEY).await, Ok(None));
        assert_eq!(store.read(Estimate::KEY).await, Ok(None));
    }
}

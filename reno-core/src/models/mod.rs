mod defaults;
mod estimate;
mod property;

pub use defaults::{INSPECTION_DATE_FORMAT, default_categories, default_property};
pub use estimate::{Estimate, EstimateCategory, EstimateItem, ItemEdit};
pub use property::{
    BATH_OPTIONS, BED_OPTIONS, GarageType, Property, PropertyEdit, PropertyField, PropertyType,
};

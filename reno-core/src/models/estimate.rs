use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};

use crate::calculations::common::parse_whole_number;

/// One renovation line. Cost is always derived, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateItem {
    pub id: String,
    pub name: String,
    #[serde(deserialize_with = "whole_number")]
    pub unit_price: u64,
    #[serde(deserialize_with = "whole_number")]
    pub qty: u64,
    #[serde(default)]
    pub conditions: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateCategory {
    pub id: String,
    pub name: String,
    /// Presentation token carried with the category; not used by any calculation.
    pub color_var: String,
    pub text_var: String,
    pub items: Vec<EstimateItem>,
}

/// Ordered category list. Order drives both the screen and the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Estimate {
    pub categories: Vec<EstimateCategory>,
}

/// A single change to one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemEdit {
    UnitPrice(u64),
    Qty(u64),
    Conditions(String),
}

impl Estimate {
    pub fn new(categories: Vec<EstimateCategory>) -> Self {
        Self { categories }
    }

    pub fn item(&self, category_id: &str, item_id: &str) -> Option<&EstimateItem> {
        self.categories
            .iter()
            .find(|c| c.id == category_id)?
            .items
            .iter()
            .find(|i| i.id == item_id)
    }

    fn item_mut(&mut self, category_id: &str, item_id: &str) -> Option<&mut EstimateItem> {
        self.categories
            .iter_mut()
            .find(|c| c.id == category_id)?
            .items
            .iter_mut()
            .find(|i| i.id == item_id)
    }

    /// Applies `edit` to the addressed item.
    ///
    /// Returns `false` when the ids do not resolve or the value is unchanged.
    pub fn apply(&mut self, category_id: &str, item_id: &str, edit: ItemEdit) -> bool {
        let Some(item) = self.item_mut(category_id, item_id) else {
            return false;
        };
        match edit {
            ItemEdit::UnitPrice(v) if item.unit_price != v => item.unit_price = v,
            ItemEdit::Qty(v) if item.qty != v => item.qty = v,
            ItemEdit::Conditions(v) if item.conditions != v => item.conditions = v,
            _ => return false,
        }
        true
    }
}

/// Accepts any JSON number (or numeric string) and normalises it to a
/// non-negative whole number, so older snapshots holding fractional or
/// negative values still load.
fn whole_number<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    struct WholeNumber;

    impl Visitor<'_> for WholeNumber {
        type Value = u64;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a number")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<u64, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<u64, E> {
            Ok(u64::try_from(v).unwrap_or(0))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<u64, E> {
            if !v.is_finite() || v <= 0.0 {
                return Ok(0);
            }
            // `as` saturates at u64::MAX
            Ok(v.round() as u64)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<u64, E> {
            Ok(parse_whole_number(v))
        }

        fn visit_unit<E: de::Error>(self) -> Result<u64, E> {
            Ok(0)
        }

        fn visit_none<E: de::Error>(self) -> Result<u64, E> {
            Ok(0)
        }
    }

    deserializer.deserialize_any(WholeNumber)
}

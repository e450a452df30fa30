//! Derived estimate totals. Nothing here is ever stored.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use super::common::to_whole;
use crate::models::{EstimateCategory, EstimateItem};

/// Share of the subtotal set aside for estimation risk.
pub const CONTINGENCY_RATE: Decimal = dec!(0.15);

/// Subtotal, contingency and total for a whole estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct EstimateTotals {
    pub subtotal: u64,
    pub contingency: u64,
    pub grand_total: u64,
}

impl EstimateTotals {
    pub fn for_categories(categories: &[EstimateCategory]) -> Self {
        let subtotal = grand_subtotal(categories);
        let contingency = contingency(subtotal);
        Self {
            subtotal,
            contingency,
            grand_total: grand_total(subtotal, contingency),
        }
    }
}

pub fn item_cost(item: &EstimateItem) -> u64 {
    item.unit_price.saturating_mul(item.qty)
}

pub fn category_subtotal(category: &EstimateCategory) -> u64 {
    category
        .items
        .iter()
        .fold(0u64, |acc, item| acc.saturating_add(item_cost(item)))
}

/// `(category id, subtotal)` in display order.
pub fn category_subtotals(categories: &[EstimateCategory]) -> Vec<(&str, u64)> {
    categories
        .iter()
        .map(|c| (c.id.as_str(), category_subtotal(c)))
        .collect()
}

pub fn grand_subtotal(categories: &[EstimateCategory]) -> u64 {
    categories
        .iter()
        .fold(0u64, |acc, c| acc.saturating_add(category_subtotal(c)))
}

/// `round(subtotal * 0.15)`, half away from zero.
pub fn contingency(subtotal: u64) -> u64 {
    to_whole(Decimal::from(subtotal) * CONTINGENCY_RATE)
}

pub fn grand_total(subtotal: u64, contingency: u64) -> u64 {
    subtotal.saturating_add(contingency)
}

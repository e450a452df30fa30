//! Estimate arithmetic: per-item costs, subtotals, contingency and the
//! budget-to-ARV ratio. All functions are pure.

pub mod arv;
pub mod common;
pub mod totals;

pub use arv::{BudgetShare, arv_display, budget_share, budget_to_arv_ratio, parse_arv};
pub use common::{format_currency, parse_whole_number};
pub use totals::{
    CONTINGENCY_RATE, EstimateTotals, category_subtotal, category_subtotals, contingency,
    grand_subtotal, grand_total, item_cost,
};

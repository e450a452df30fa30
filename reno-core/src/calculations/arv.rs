//! Budget-to-ARV ratio for the investment strategy summary.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;

use super::common::{leading_number, to_whole};
use crate::models::Property;

static NON_NUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9.]").expect("non-numeric pattern is valid"));

/// Reads the free-text ARV, e.g. `"$200,000"`, as a divisor.
///
/// Everything but digits and `.` is stripped first. An empty result, an
/// unparseable one such as `"."`, or zero all yield `1` so the ratio never
/// divides by zero.
pub fn parse_arv(raw: &str) -> Decimal {
    let stripped = NON_NUMERIC.replace_all(raw, "");
    match leading_number(&stripped) {
        Some(value) if !value.is_zero() => value,
        _ => Decimal::ONE,
    }
}

/// `round(subtotal / arv * 100)` as a whole percentage.
///
/// Never fails. An empty ARV gives the degenerate `subtotal * 100`; callers
/// that show this to people should go through [`budget_share`] instead.
pub fn budget_to_arv_ratio(property: &Property, subtotal: u64) -> u64 {
    let arv = parse_arv(&property.estimated_arv);
    Decimal::from(subtotal)
        .checked_div(arv)
        .and_then(|share| share.checked_mul(Decimal::ONE_HUNDRED))
        .map(to_whole)
        .unwrap_or(u64::MAX)
}

/// What the strategy summary shows for the budget share.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetShare {
    /// No ARV entered; rendered as a placeholder.
    Unavailable,
    Percent(u64),
}

impl fmt::Display for BudgetShare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => f.write_str("X"),
            Self::Percent(p) => write!(f, "{p}"),
        }
    }
}

/// Picks the placeholder when the ARV field is empty, the ratio otherwise.
pub fn budget_share(property: &Property, subtotal: u64) -> BudgetShare {
    if property.estimated_arv.is_empty() {
        BudgetShare::Unavailable
    } else {
        BudgetShare::Percent(budget_to_arv_ratio(property, subtotal))
    }
}

/// ARV as shown in the strategy sentence, `N/A` when blank.
pub fn arv_display(property: &Property) -> &str {
    if property.estimated_arv.is_empty() {
        "N/A"
    } else {
        &property.estimated_arv
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::default_property;

    fn with_arv(arv: &str) -> Property {
        let mut p = default_property();
        p.estimated_arv = arv.to_string();
        p
    }

    #[test]
    fn parse_arv_strips_currency_formatting() {
        assert_eq!(parse_arv("$200,000"), dec!(200000));
        assert_eq!(parse_arv("USD 350,500.50"), dec!(350500.50));
    }

    #[test]
    fn parse_arv_falls_back_to_one() {
        assert_eq!(parse_arv(""), Decimal::ONE);
        assert_eq!(parse_arv("unknown"), Decimal::ONE);
        assert_eq!(parse_arv("."), Decimal::ONE);
        assert_eq!(parse_arv("$0"), Decimal::ONE);
    }

    #[test]
    fn ratio_for_forty_thousand_against_two_hundred_thousand_is_twenty() {
        assert_eq!(budget_to_arv_ratio(&with_arv("$200,000"), 40_000), 20);
    }

    #[test]
    fn ratio_rounds_half_away_from_zero() {
        // 43290 / 200000 * 100 = 21.645
        assert_eq!(budget_to_arv_ratio(&with_arv("200000"), 43_290), 22);
    }

    #[test]
    fn empty_arv_ratio_uses_divisor_one() {
        assert_eq!(budget_to_arv_ratio(&with_arv(""), 43_290), 4_329_000);
    }

    #[test]
    fn empty_arv_selects_placeholder() {
        let p = with_arv("");

        assert_eq!(budget_share(&p, 43_290), BudgetShare::Unavailable);
        assert_eq!(budget_share(&p, 43_290).to_string(), "X");
        assert_eq!(arv_display(&p), "N/A");
    }

    #[test]
    fn entered_arv_selects_percentage() {
        let p = with_arv("$200,000");

        assert_eq!(budget_share(&p, 40_000), BudgetShare::Percent(20));
        assert_eq!(budget_share(&p, 40_000).to_string(), "20");
        assert_eq!(arv_display(&p), "$200,000");
    }
}

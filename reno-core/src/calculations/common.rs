//! Shared numeric helpers: rounding, lenient number parsing and currency display.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

static LEADING_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)").expect("leading number pattern is valid")
});

/// Rounds to a whole number, halves away from zero.
///
/// ```
/// use rust_decimal_macros::dec;
/// use reno_core::calculations::common::round_whole;
///
/// assert_eq!(round_whole(dec!(6493.5)), dec!(6494));
/// assert_eq!(round_whole(dec!(6493.49)), dec!(6493));
/// assert_eq!(round_whole(dec!(-2.5)), dec!(-3));
/// ```
pub fn round_whole(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Converts a decimal to a non-negative whole number, rounding first.
/// Negative values clamp to zero and values too large for `u64` saturate.
pub fn to_whole(value: Decimal) -> u64 {
    let rounded = round_whole(value);
    if rounded.is_sign_negative() {
        return 0;
    }
    rounded.to_u64().unwrap_or(u64::MAX)
}

/// Parses the longest numeric prefix of `input`, the way a browser's
/// `parseFloat` reads `"12.5 sqft"` as `12.5`. Leading whitespace is skipped.
pub fn leading_number(input: &str) -> Option<Decimal> {
    let matched = LEADING_NUMBER.find(input.trim_start())?.as_str();
    let digits = matched.strip_suffix('.').unwrap_or(matched);
    Decimal::from_str(digits).ok()
}

/// Lenient whole-number entry for prices and quantities.
///
/// Thousands separators are dropped, the leading number is rounded half away
/// from zero, and anything empty, unparseable or negative becomes `0`.
pub fn parse_whole_number(input: &str) -> u64 {
    let normalized = input.trim().replace(',', "");
    leading_number(&normalized).map(to_whole).unwrap_or(0)
}

/// `$` plus en-US digit grouping, e.g. `$43,290`.
pub fn format_currency(amount: u64) -> String {
    format!("${}", group_thousands(amount))
}

fn group_thousands(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

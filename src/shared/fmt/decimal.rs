//! Decimal formatting utilities for human-readable display.
//!
//! Handles `rust_decimal::Decimal` values: USD currency strings with
//! magnitude-dependent precision, abbreviated suffixes (K/M/B/T), and signed
//! percentages.

use super::num::{group_thousands, trim_fraction};
use rust_decimal::prelude::*;
use rust_decimal::RoundingStrategy;

const THOUSAND: i64 = 1_000;
const MILLION: i64 = 1_000_000;
const BILLION: i64 = 1_000_000_000;
const TRILLION: i64 = 1_000_000_000_000;

fn round_half_up(value: &Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Format a value as US dollars with between `min_fraction` and `max_fraction`
/// fraction digits, e.g. `$1,234.50`.
pub fn format_currency(value: &Decimal, min_fraction: u32, max_fraction: u32) -> String {
    let max_fraction = max_fraction.max(min_fraction);
    let rounded = round_half_up(value, max_fraction);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    let text = rounded.abs().to_string();
    let (integer, fraction) = match text.split_once('.') {
        Some((i, f)) => (i.to_string(), f.to_string()),
        None => (text, String::new()),
    };
    let fraction = trim_fraction(&fraction, min_fraction as usize);

    if fraction.is_empty() {
        format!("{}${}", sign, group_thousands(&integer))
    } else {
        format!("{}${}.{}", sign, group_thousands(&integer), fraction)
    }
}

/// Fraction-digit bounds `(min, max)` for a price, chosen by magnitude.
pub fn price_decimal_places(price: &Decimal) -> (u32, u32) {
    let abs = price.abs();
    if abs >= Decimal::from(1000) {
        (2, 2)
    } else if abs >= Decimal::ONE {
        (2, 4)
    } else if abs >= Decimal::new(1, 2) {
        (4, 6)
    } else {
        (6, 8)
    }
}

/// Format a price as USD with precision suited to its magnitude.
pub fn format_price(price: &Decimal) -> String {
    let (min, max) = price_decimal_places(price);
    format_currency(price, min, max)
}

/// Abbreviate a large figure with K/M/B/T suffixes (two decimals).
///
/// Values below one thousand are printed as-is.
pub fn format_large_number(num: &Decimal) -> String {
    let tiers = [
        (TRILLION, "T"),
        (BILLION, "B"),
        (MILLION, "M"),
        (THOUSAND, "K"),
    ];
    for (threshold, suffix) in tiers {
        let threshold = Decimal::from(threshold);
        if *num >= threshold {
            return format!("{:.2}{}", round_half_up(&(num / threshold), 2), suffix);
        }
    }
    num.normalize().to_string()
}

/// Format a percentage with an explicit sign for non-negative values, e.g. `+2.50%`.
pub fn format_percentage(value: &Decimal, fraction_digits: u32) -> String {
    let rounded = round_half_up(value, fraction_digits);
    let sign = if rounded >= Decimal::ZERO { "+" } else { "" };
    format!(
        "{}{:.prec$}%",
        sign,
        rounded,
        prec = fraction_digits as usize
    )
}

/// Percent change from `previous` to `current`; zero when `previous` is zero.
pub fn percent_change(current: &Decimal, previous: &Decimal) -> Decimal {
    if previous.is_zero() {
        return Decimal::ZERO;
    }
    (current - previous) / previous * Decimal::from(100)
}

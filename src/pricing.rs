//! Price formatting and GST math.
//!
//! Formatting never hard-fails: an unrecognised locale/currency pair falls
//! back to a plain `"<amount> <code>"` rendering.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::value_objects::Money;

/// `base * (1 + rate)`, rounded half-up at cent granularity, never negative.
pub fn apply_tax(base: Decimal, rate: Decimal) -> Decimal {
    let taxed = (base * (Decimal::ONE + rate))
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    taxed.max(Decimal::ZERO)
}

/// Locale-aware currency rendering: symbol prefix, thousands grouping, two
/// decimals. Unknown pairs fall back to `"<amount> <code>"`.
pub fn format_currency(amount: Decimal, currency: &str, locale: &str) -> String {
    match symbol_for(currency, locale) {
        Some(symbol) => format!("{symbol}{}", grouped_two_decimals(amount)),
        None => format!("{} {}", amount.normalize(), currency),
    }
}

pub fn format_money(money: &Money, locale: &str) -> String {
    format_currency(money.amount(), money.currency(), locale)
}

fn symbol_for(currency: &str, locale: &str) -> Option<&'static str> {
    let lang = locale.split(['-', '_']).next().unwrap_or("");
    match (currency, lang) {
        ("AUD", "en") => Some("$"),
        ("AUD", "zh") => Some("AU$"),
        ("USD", "en") => Some("$"),
        ("USD", "zh") => Some("US$"),
        ("CNY", "zh") => Some("¥"),
        ("CNY", "en") => Some("CN¥"),
        _ => None,
    }
}

fn grouped_two_decimals(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let raw = rounded.to_string();
    let (sign, digits) = match raw.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", raw.as_str()),
    };
    let mut parts = digits.splitn(2, '.');
    let int_part = parts.next().unwrap_or("0");
    let mut frac: String = parts.next().unwrap_or("").chars().take(2).collect();
    while frac.len() < 2 {
        frac.push('0');
    }

    let mut grouped = String::new();
    let len = int_part.len();
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("{sign}{grouped}.{frac}")
}

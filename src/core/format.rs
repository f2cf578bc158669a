//! Display formatting for converted amounts

use rust_decimal::prelude::*;

const MAX_FRACTION_DIGITS: u32 = 6;

/// Formats `value` with thousands separators and at most six fraction
/// digits, dropping trailing zeros.
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    // Parse the shortest round-trip text so no binary expansion digits leak in
    let text = Decimal::from_str(&value.to_string())
        .map(|decimal| {
            decimal
                .round_dp_with_strategy(MAX_FRACTION_DIGITS, RoundingStrategy::MidpointAwayFromZero)
                .normalize()
                .to_string()
        })
        .unwrap_or_else(|_| round_outside_decimal_range(value).to_string());

    let (negative, digits) = match text.strip_prefix('-') {
        Some(digits) => (true, digits),
        None => (false, text.as_str()),
    };
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (digits, None),
    };

    let mut output = String::with_capacity(text.len() + text.len() / 3 + 1);
    if negative && digits.chars().any(|ch| ch.is_ascii_digit() && ch != '0') {
        output.push('-');
    }
    output.push_str(&group_thousands(int_part));
    if let Some(frac_part) = frac_part {
        output.push('.');
        output.push_str(frac_part);
    }
    output
}

/// Values beyond `Decimal` have no fractional digits left, and tiny ones
/// round away entirely.
fn round_outside_decimal_range(value: f64) -> f64 {
    if value.abs() >= 1.0 {
        value
    } else {
        (value * 1e6).round() / 1e6
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// `1 USD = 1500.25 NGN`
pub fn format_rate_line(from: &str, to: &str, rate: f64) -> String {
    format!("1 {from} = {rate} {to}")
}

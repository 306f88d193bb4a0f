//! Human-readable money formatting.
//!
//! Amounts are shown the way local receipts print them: digits grouped
//! by thousands with a space, a comma before the two fractional digits, and the
//! currency after the number (`1 234,50 TJS`).

use lunchsplit_calculator::round2;
use lunchsplit_types::Amount;

/// Formats `amount` with grouping, two decimals and an optional currency suffix.
pub fn format_money(amount: Amount, currency: &str) -> String {
    let rounded = round2(amount);
    let text = rounded.abs().to_string();
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(digit);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    let currency = currency.trim();
    if currency.is_empty() {
        format!("{sign}{grouped},{fraction}")
    } else {
        format!("{sign}{grouped},{fraction} {currency}")
    }
}

/// Plain `1234.50` rendering used in machine-readable exports.
pub fn plain_amount(amount: Amount) -> String {
    round2(amount).to_string()
}

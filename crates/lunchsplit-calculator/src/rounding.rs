//! Minor-unit rounding applied at every computation boundary.
//!
//! Amounts are rounded to two fractional digits, halves away from zero, and the
//! result always carries a scale of exactly two so serialized amounts read as
//! `20.00` rather than `20`.

use lunchsplit_types::Amount;
use rust_decimal::RoundingStrategy;

/// Number of fractional digits in a minor currency unit.
pub const MINOR_UNIT_DIGITS: u32 = 2;

/// Rounds `value` to two fractional digits.
pub fn round2(value: Amount) -> Amount {
    let mut rounded =
        value.round_dp_with_strategy(MINOR_UNIT_DIGITS, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(MINOR_UNIT_DIGITS);
    rounded
}

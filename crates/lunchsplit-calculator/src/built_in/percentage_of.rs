//! Percentage of a base amount
//!
//! result = round2(base * percent / 100)
//!
//! For example, 10% of 125.50 is 12.55. Percentages are expressed on the 0-100
//! scale, the way they are typed on a receipt.

use crate::rounding::round2;
use lunchsplit_types::Amount;
use rust_decimal::Decimal;

/// Computes `percent`% of `base`, rounded to minor units.
pub fn percentage_of(base: Amount, percent: Decimal) -> Amount {
    round2(base * percent / Decimal::ONE_HUNDRED)
}

//! Proportional allocation
//!
//! Distributes `total_amount` proportionally based on an `individual_value`
//! relative to an `aggregate_value`.
//!
//! result = round2(total_amount * (individual_value / aggregate_value))
//!
//! Returns 0 when `aggregate_value` is not positive.

use crate::rounding::round2;
use lunchsplit_types::Amount;
use rust_decimal::Decimal;

/// Ratio of `individual_value` to `aggregate_value`, or 0 for a non-positive aggregate.
pub fn proportion(individual_value: Amount, aggregate_value: Amount) -> Decimal {
    if aggregate_value > Decimal::ZERO {
        individual_value / aggregate_value
    } else {
        Decimal::ZERO
    }
}

/// Allocates the share of `total_amount` that corresponds to `individual_value`.
pub fn allocate(total_amount: Amount, individual_value: Amount, aggregate_value: Amount) -> Amount {
    round2(total_amount * proportion(individual_value, aggregate_value))
}

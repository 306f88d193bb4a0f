//! Even split of an amount between a number of sharers
//!
//! result = round2(total / share_count)
//!
//! Returns `None` when nobody shares the amount.

use crate::rounding::round2;
use lunchsplit_types::Amount;
use rust_decimal::Decimal;

/// Splits `total` evenly between `share_count` people, rounded to minor units.
pub fn even_split(total: Amount, share_count: usize) -> Option<Amount> {
    if share_count == 0 {
        return None;
    }
    Some(round2(total / Decimal::from(share_count)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_even_split() {
        assert_eq!(even_split(dec!(10.00), 2), Some(dec!(5.00)));
        assert_eq!(even_split(dec!(10.00), 3), Some(dec!(3.33)));
        assert_eq!(even_split(dec!(0.05), 2), Some(dec!(0.03)));
    }

    #[test]
    fn test_even_split_without_sharers() {
        assert_eq!(even_split(dec!(10.00), 0), None);
    }
}

//! Input validation and parsing.
//!
//! Text typed by the user is parsed here and rejected with a
//! [`ValidationError`] before it can reach the engine. Decimal input accepts
//! both `.` and `,` as the separator.

use crate::error::ValidationError;
use lunchsplit_calculator::rounding::MINOR_UNIT_DIGITS;
use lunchsplit_types::{Amount, ExtraCostConfig, Participant, ParticipantId, TipKind};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Largest accepted unit price. Keeps `price * quantity` and the bill totals
/// derived from it well inside the range of [`Decimal`].
pub const MAX_PRICE: i64 = 1_000_000_000_000;

/// Largest accepted quantity of a single dish.
pub const MAX_QUANTITY: u32 = 1_000_000;

/// Largest accepted tax, service or tip percentage.
pub const MAX_PERCENT: i64 = 10_000;

/// Trims `name` and rejects it when empty.
pub fn validate_name(name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_name());
    }
    Ok(trimmed.to_string())
}

/// Trims `name`, rejects it when empty or when another participant already
/// uses it (case-insensitive). `except` is skipped, so renaming a participant
/// to a different casing of their own name is allowed.
pub fn validate_participant_name(
    name: &str,
    existing: &[Participant],
    except: Option<&ParticipantId>,
) -> Result<String, ValidationError> {
    let trimmed = validate_name(name)?;
    let lowered = trimmed.to_lowercase();
    let taken = existing
        .iter()
        .filter(|p| Some(&p.id) != except)
        .any(|p| p.name.to_lowercase() == lowered);
    if taken {
        return Err(ValidationError::duplicate_name(&trimmed));
    }
    Ok(trimmed)
}

/// A unit price must be positive and expressible in minor units.
pub fn validate_price(price: Amount) -> Result<Amount, ValidationError> {
    if price <= Decimal::ZERO {
        return Err(ValidationError::amount("price", price, "price must be greater than zero"));
    }
    if price > Decimal::from(MAX_PRICE) {
        return Err(ValidationError::amount(
            "price",
            price,
            format!("price must not exceed {MAX_PRICE}"),
        ));
    }
    if price.normalize().scale() > MINOR_UNIT_DIGITS {
        return Err(ValidationError::amount(
            "price",
            price,
            format!("price must have at most {MINOR_UNIT_DIGITS} decimal places"),
        ));
    }
    Ok(price)
}

/// Quantities are whole, positive numbers of units.
pub fn validate_quantity(quantity: u32) -> Result<u32, ValidationError> {
    if quantity == 0 {
        return Err(ValidationError::quantity(quantity, "quantity must be at least 1"));
    }
    if quantity > MAX_QUANTITY {
        return Err(ValidationError::quantity(
            quantity,
            format!("quantity must not exceed {MAX_QUANTITY}"),
        ));
    }
    Ok(quantity)
}

/// Percentages and tip values must not be negative.
pub fn validate_non_negative(field: &str, value: Decimal) -> Result<Decimal, ValidationError> {
    if value < Decimal::ZERO {
        return Err(ValidationError::amount(field, value, "value must not be negative"));
    }
    Ok(value)
}

fn validate_at_most(field: &str, value: Decimal, limit: i64) -> Result<Decimal, ValidationError> {
    if value > Decimal::from(limit) {
        let reason = format!("value must not exceed {limit}");
        return Err(ValidationError::amount(field, value, reason));
    }
    Ok(value)
}

/// Checks every component of an extra-cost configuration.
pub fn validate_extra_costs(config: &ExtraCostConfig) -> Result<(), ValidationError> {
    validate_non_negative("tax percent", config.tax_percent)?;
    validate_non_negative("service percent", config.service_percent)?;
    validate_non_negative("tip", config.tip_value)?;
    validate_at_most("tax percent", config.tax_percent, MAX_PERCENT)?;
    validate_at_most("service percent", config.service_percent, MAX_PERCENT)?;
    let tip_limit = match config.tip_kind {
        TipKind::Percent => MAX_PERCENT,
        TipKind::Fixed => MAX_PRICE,
    };
    validate_at_most("tip", config.tip_value, tip_limit)?;
    Ok(())
}

fn parse_decimal(field: &str, input: &str) -> Result<Decimal, ValidationError> {
    let normalized = input.trim().replace(',', ".");
    if normalized.is_empty() {
        return Err(ValidationError::amount(field, input, "value is required"));
    }
    Decimal::from_str(&normalized)
        .map_err(|_| ValidationError::amount(field, input, "not a number"))
}

/// Parses and validates a unit price.
pub fn parse_amount(input: &str) -> Result<Amount, ValidationError> {
    let value = parse_decimal("price", input)?;
    validate_price(value).map_err(|err| with_input(err, input))
}

/// Parses a non-negative percentage or tip value. An empty input means zero.
pub fn parse_percent(field: &str, input: &str) -> Result<Decimal, ValidationError> {
    if input.trim().is_empty() {
        return Ok(Decimal::ZERO);
    }
    let value = parse_decimal(field, input)?;
    validate_non_negative(field, value).map_err(|err| with_input(err, input))
}

// Report the text the user typed rather than the parsed value.
fn with_input(err: ValidationError, input: &str) -> ValidationError {
    match err {
        ValidationError::InvalidAmount { field, reason, .. } => {
            ValidationError::InvalidAmount { field, input: input.to_string(), reason }
        }
        other => other,
    }
}

/// Parses a whole, positive quantity.
pub fn parse_quantity(input: &str) -> Result<u32, ValidationError> {
    let trimmed = input.trim();
    let value: i64 = trimmed
        .parse()
        .map_err(|_| ValidationError::quantity(input, "quantity must be a whole number"))?;
    if value < 1 {
        return Err(ValidationError::quantity(input, "quantity must be at least 1"));
    }
    u32::try_from(value)
        .map_err(|_| ValidationError::quantity(input, "quantity is too large"))
        .and_then(validate_quantity)
}

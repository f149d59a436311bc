//! Price parsing and rounding for variant channel listings.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::Value;

use crate::PriceError;

/// Decimal places kept on listing prices.
pub const PRICE_DECIMAL_PLACES: u32 = 2;

/// Rounds to [`PRICE_DECIMAL_PLACES`], halves away from zero
/// (`19.995` becomes `20.00`).
#[must_use]
pub fn round_price(price: Decimal) -> Decimal {
    price.round_dp_with_strategy(PRICE_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Interprets a record's raw price field.
///
/// Returns `Ok(None)` when the record carries no usable price: the field is
/// absent, `null`, a blank string, or zero. Such records get no variant.
///
/// # Errors
///
/// Returns [`PriceError`] when the value is present but is not a
/// non-negative decimal.
pub fn parse_price(raw: Option<&Value>) -> Result<Option<Decimal>, PriceError> {
    let text = match raw {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => return Ok(None),
        Some(Value::String(s)) => s.trim().to_owned(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => {
            return Err(PriceError {
                raw: other.to_string(),
                reason: "expected a number or numeric string".to_string(),
            })
        }
    };

    let price = Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|e| PriceError {
            raw: text.clone(),
            reason: e.to_string(),
        })?;

    if price.is_sign_negative() && !price.is_zero() {
        return Err(PriceError {
            raw: text,
            reason: "price must not be negative".to_string(),
        });
    }
    let rounded = round_price(price);
    if rounded.is_zero() {
        return Ok(None);
    }

    Ok(Some(rounded))
}

//! Exact-decimal helpers for amounts, quantities and currencies.
//!
//! Amounts are persisted as decimal text and only ever handled as [`Decimal`] in
//! memory. Rounding to a currency's minor unit is always
//! round-half-away-from-zero.

use crate::errors::{Error, Result};
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Rounding rule used for every currency-precision rounding in the crate.
pub const ROUNDING: RoundingStrategy = RoundingStrategy::MidpointAwayFromZero;

/// Largest accepted item quantity.
pub const MAX_QUANTITY: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Largest accepted budget or unit price.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// Currencies without a minor unit.
const ZERO_DECIMAL_CURRENCIES: &[&str] = &["CLP", "ISK", "JPY", "KRW", "UGX", "VND", "XAF", "XOF"];

/// Currencies with three decimal places.
const THREE_DECIMAL_CURRENCIES: &[&str] = &["BHD", "IQD", "JOD", "KWD", "LYD", "OMR", "TND"];

/// Number of decimal places in the minor unit of `currency`.
///
/// Unknown codes fall back to two places.
#[must_use]
pub fn minor_units(currency: &str) -> u32 {
    if ZERO_DECIMAL_CURRENCIES.contains(&currency) {
        0
    } else if THREE_DECIMAL_CURRENCIES.contains(&currency) {
        3
    } else {
        2
    }
}

/// Rounds `amount` to the minor-unit precision of `currency`.
///
/// The result always carries exactly that many decimal places, so `7.5` in USD
/// becomes `7.50`.
#[must_use]
pub fn round_to_currency(amount: Decimal, currency: &str) -> Decimal {
    let dp = minor_units(currency);
    let mut rounded = amount.round_dp_with_strategy(dp, ROUNDING);
    rounded.rescale(dp);
    rounded
}

/// Normalizes and validates a currency code: three ASCII letters, upper-cased.
pub fn normalize_currency(raw: &str) -> Result<String> {
    let code = raw.trim();
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(Error::validation(format!(
            "Currency must be a three-letter code, got {raw:?}"
        )));
    }
    Ok(code.to_ascii_uppercase())
}

/// Rejects quantities that are zero, negative or above [`MAX_QUANTITY`].
pub fn ensure_positive_quantity(quantity: Decimal) -> Result<Decimal> {
    if quantity <= Decimal::ZERO {
        return Err(Error::validation(format!(
            "Quantity must be greater than zero, got {quantity}"
        )));
    }
    if quantity > MAX_QUANTITY {
        return Err(Error::validation(format!(
            "Quantity cannot exceed {MAX_QUANTITY}, got {quantity}"
        )));
    }
    Ok(quantity)
}

/// Rejects negative amounts and amounts above [`MAX_AMOUNT`]; `field` names the
/// offending input in the message.
pub fn ensure_non_negative(field: &str, amount: Decimal) -> Result<Decimal> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(Error::validation(format!(
            "{field} cannot be negative, got {amount}"
        )));
    }
    if amount > MAX_AMOUNT {
        return Err(Error::validation(format!(
            "{field} cannot exceed {MAX_AMOUNT}, got {amount}"
        )));
    }
    Ok(amount)
}

/// Canonical text form used for storage.
#[must_use]
pub fn to_stored(amount: Decimal) -> String {
    amount.to_string()
}

/// Parses a stored decimal column back into a [`Decimal`].
pub fn parse_stored(column: &'static str, raw: &str) -> Result<Decimal> {
    Decimal::from_str(raw).map_err(|_| Error::CorruptDecimal {
        column,
        value: raw.to_string(),
    })
}

//! Pricing
//!
//! Money arithmetic on minor units. `rusty_money` amounts are combined through these helpers
//! so overflow and currency mismatches surface as [`PricingError`] instead of panics.

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

/// Errors that can occur while combining monetary amounts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// Amounts in different currencies were combined (expected, actual).
    #[error("currency mismatch: expected {0}, got {1}")]
    CurrencyMismatch(&'static str, &'static str),

    /// The result does not fit in minor units.
    #[error("amount overflows minor units")]
    Overflow,
}

/// Returns a zero amount in the given currency.
pub fn zero(currency: &Currency) -> Money<'_, Currency> {
    Money::from_minor(0, currency)
}

/// Checks that `amount` is denominated in `currency`.
///
/// # Errors
///
/// Returns [`PricingError::CurrencyMismatch`] if the currencies differ.
pub fn ensure_currency(amount: &Money<'_, Currency>, currency: &Currency) -> Result<(), PricingError> {
    if amount.currency() == currency {
        Ok(())
    } else {
        Err(PricingError::CurrencyMismatch(
            currency.iso_alpha_code,
            amount.currency().iso_alpha_code,
        ))
    }
}

/// Multiplies a unit price by a quantity.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the product does not fit in minor units.
pub fn multiply<'a>(
    unit: &Money<'a, Currency>,
    quantity: u32,
) -> Result<Money<'a, Currency>, PricingError> {
    unit.to_minor_units()
        .checked_mul(i64::from(quantity))
        .map(|minor| Money::from_minor(minor, unit.currency()))
        .ok_or(PricingError::Overflow)
}

/// Adds two amounts of the same currency.
///
/// # Errors
///
/// - [`PricingError::CurrencyMismatch`]: the amounts are in different currencies.
/// - [`PricingError::Overflow`]: the sum does not fit in minor units.
pub fn add<'a>(
    lhs: &Money<'a, Currency>,
    rhs: &Money<'_, Currency>,
) -> Result<Money<'a, Currency>, PricingError> {
    ensure_currency(rhs, lhs.currency())?;

    lhs.to_minor_units()
        .checked_add(rhs.to_minor_units())
        .map(|minor| Money::from_minor(minor, lhs.currency()))
        .ok_or(PricingError::Overflow)
}

/// Sums a list of amounts, all of which must be in `currency`.
///
/// An empty list sums to zero.
///
/// # Errors
///
/// - [`PricingError::CurrencyMismatch`]: an amount is not in `currency`.
/// - [`PricingError::Overflow`]: the sum does not fit in minor units.
pub fn total<'a, 'm, 'c: 'm>(
    amounts: impl IntoIterator<Item = &'m Money<'c, Currency>>,
    currency: &'a Currency,
) -> Result<Money<'a, Currency>, PricingError> {
    amounts
        .into_iter()
        .try_fold(zero(currency), |acc, amount| add(&acc, amount))
}

//! Delivery Fees

use rusty_money::{Money, iso::Currency};
use tracing::warn;

use super::Tariff;

/// Delivery fee and minimum-order status of an order subtotal in one zone.
///
/// Quotes are cheap to compute and are not cached; compute a fresh one whenever the
/// subtotal changes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FeeQuote<'a> {
    fee: Money<'a, Currency>,
    meets_minimum: bool,
    missing_amount: Money<'a, Currency>,
    is_free_delivery: bool,
    until_free_delivery: Option<Money<'a, Currency>>,
}

impl<'a> FeeQuote<'a> {
    /// Delivery fee owed for this order.
    pub fn fee(&self) -> &Money<'a, Currency> {
        &self.fee
    }

    /// Whether the subtotal reaches the zone's minimum order amount.
    ///
    /// Orders below the minimum must not be submitted.
    pub fn meets_minimum(&self) -> bool {
        self.meets_minimum
    }

    /// How far the subtotal is below the minimum order amount; zero once it is met.
    pub fn missing_amount(&self) -> &Money<'a, Currency> {
        &self.missing_amount
    }

    /// Whether the delivery fee is waived.
    pub fn is_free_delivery(&self) -> bool {
        self.is_free_delivery
    }

    /// How much more must be spent for free delivery.
    ///
    /// `None` once delivery is free, and for zones without a free-delivery threshold.
    pub fn amount_until_free_delivery(&self) -> Option<&Money<'a, Currency>> {
        self.until_free_delivery.as_ref()
    }
}

impl<'a> Tariff<'a> {
    /// Compute the delivery fee and minimum-order status for `subtotal`.
    ///
    /// - The minimum is met when `subtotal ≥ minimum_order`.
    /// - Delivery is free when the zone fee is zero or `subtotal ≥ free_delivery_threshold`.
    ///
    /// A negative subtotal never meets the minimum and is charged the full delivery fee. A
    /// subtotal in a foreign currency is treated the same way, with the whole minimum missing.
    pub fn compute_fee(&self, subtotal: &Money<'_, Currency>) -> FeeQuote<'a> {
        let currency = self.delivery_fee.currency();
        let fee = self.delivery_fee.to_minor_units();
        let minimum = self.minimum_order.to_minor_units();
        let always_free = fee == 0;

        let quote = |fee: i64,
                     meets_minimum: bool,
                     missing: i64,
                     is_free_delivery: bool,
                     until_free: Option<i64>| FeeQuote {
            fee: Money::from_minor(fee, currency),
            meets_minimum,
            missing_amount: Money::from_minor(missing, currency),
            is_free_delivery,
            until_free_delivery: until_free.map(|minor| Money::from_minor(minor, currency)),
        };

        if subtotal.currency() != currency {
            warn!(
                zone = %self.id,
                expected = currency.iso_alpha_code,
                actual = subtotal.currency().iso_alpha_code,
                "subtotal currency does not match tariff"
            );

            return quote(fee, false, minimum, always_free, None);
        }

        let subtotal = subtotal.to_minor_units();

        if subtotal < 0 {
            warn!(zone = %self.id, subtotal, "negative subtotal");

            return quote(fee, false, minimum.saturating_sub(subtotal), always_free, None);
        }

        let meets_minimum = subtotal >= minimum;
        let missing = minimum.saturating_sub(subtotal).max(0);

        let threshold = self
            .free_delivery_threshold
            .as_ref()
            .map(Money::to_minor_units);

        let is_free_delivery =
            always_free || threshold.is_some_and(|threshold| subtotal >= threshold);

        if is_free_delivery {
            quote(0, meets_minimum, missing, true, None)
        } else {
            let until_free = threshold.map(|threshold| threshold.saturating_sub(subtotal));

            quote(fee, meets_minimum, missing, false, until_free)
        }
    }
}

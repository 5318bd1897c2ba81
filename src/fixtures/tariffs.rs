//! Tariff Fixtures

use rusty_money::Money;
use serde::Deserialize;

use crate::{
    fixtures::{FixtureError, parse_currency, parse_price},
    tariffs::{PostalCode, Tariff, TariffTable},
};

/// Wrapper for a tariff table in YAML
#[derive(Debug, Deserialize)]
pub struct TariffsFixture {
    /// Currency of every amount in the table (e.g., "EUR")
    pub currency: String,

    /// Delivery zones
    pub zones: Vec<ZoneFixture>,
}

/// Delivery zone fixture
#[derive(Debug, Deserialize)]
pub struct ZoneFixture {
    /// Zone id
    pub id: String,

    /// Zone name
    pub name: String,

    /// Postal codes served, as quoted strings (e.g., "01067")
    pub postal_codes: Vec<String>,

    /// Delivery fee (e.g., "1.00 EUR")
    pub delivery_fee: String,

    /// Minimum order amount
    pub minimum_order: String,

    /// Subtotal from which delivery is free
    #[serde(default)]
    pub free_delivery_threshold: Option<String>,
}

impl TariffsFixture {
    /// Build a tariff table from the fixture
    ///
    /// # Errors
    ///
    /// Returns an error if an amount, currency or postal code cannot be parsed, or if the table
    /// is invalid.
    pub fn try_into_table<'a>(self) -> Result<TariffTable<'a>, FixtureError> {
        let currency = parse_currency(&self.currency)?;

        let zones = self
            .zones
            .into_iter()
            .map(Tariff::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(TariffTable::with_tariffs(zones, currency)?)
    }
}

impl TryFrom<ZoneFixture> for Tariff<'_> {
    type Error = FixtureError;

    fn try_from(fixture: ZoneFixture) -> Result<Self, Self::Error> {
        let money = |s: &str| {
            parse_price(s).map(|(minor_units, currency)| Money::from_minor(minor_units, currency))
        };

        let postal_codes = fixture
            .postal_codes
            .iter()
            .map(|code| code.parse::<PostalCode>())
            .collect::<Result<Vec<_>, _>>()?;

        let tariff = Tariff::new(
            fixture.id,
            fixture.name,
            money(&fixture.delivery_fee)?,
            money(&fixture.minimum_order)?,
        )
        .with_postal_codes(postal_codes);

        match fixture.free_delivery_threshold.as_deref() {
            Some(threshold) => Ok(tariff.with_free_delivery_threshold(money(threshold)?)),
            None => Ok(tariff),
        }
    }
}

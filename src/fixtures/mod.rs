//! Fixtures
//!
//! Tariff tables and menus are static configuration, loaded once from YAML files below a base
//! path: `tariffs/<name>.yml` and `menu/<name>.yml`.

use std::{fs, path::PathBuf};

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::iso::{Currency, EUR, GBP, USD};
use thiserror::Error;
use tracing::info;

use crate::{
    menu::{Menu, MenuError},
    tariffs::{TariffError, TariffTable},
};

pub mod menu;
pub mod tariffs;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// A menu item has neither or both of `price` and `sizes`
    #[error("Menu item {0} must have exactly one of price or sizes")]
    InvalidPricing(u32),

    /// Tariff table and menu use different currencies
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// The tariff table is invalid
    #[error(transparent)]
    Tariff(#[from] TariffError),

    /// The menu is invalid
    #[error(transparent)]
    Menu(#[from] MenuError),

    /// Requested data has not been loaded
    #[error("No {0} loaded")]
    NotLoaded(&'static str),
}

/// Fixture
#[derive(Debug)]
pub struct Fixture<'a> {
    /// Base path for fixture files
    base_path: PathBuf,

    tariffs: Option<TariffTable<'a>>,
    menu: Option<Menu<'a>>,

    /// Currency for the fixture set
    currency: Option<&'static Currency>,
}

impl<'a> Fixture<'a> {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            tariffs: None,
            menu: None,
            currency: None,
        }
    }

    /// Load a tariff table from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, if the table is invalid, or if its
    /// currency differs from an already loaded menu.
    pub fn load_tariffs(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("tariffs").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: tariffs::TariffsFixture = serde_norway::from_str(&contents)?;

        let table = fixture.try_into_table()?;

        self.set_currency(table.currency())?;

        info!(
            path = %file_path.display(),
            zones = table.len(),
            "loaded tariff table"
        );

        self.tariffs = Some(table);

        Ok(self)
    }

    /// Load a menu from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, if the menu is invalid, or if its
    /// currency differs from an already loaded tariff table.
    pub fn load_menu(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("menu").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: menu::MenuFixture = serde_norway::from_str(&contents)?;

        let menu = fixture.try_into_menu()?;

        self.set_currency(menu.currency())?;

        info!(path = %file_path.display(), items = menu.len(), "loaded menu");

        self.menu = Some(menu);

        Ok(self)
    }

    /// Load a complete fixture set (tariffs and menu with the same name)
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture.load_tariffs(name)?.load_menu(name)?;

        Ok(fixture)
    }

    /// Get the tariff table
    ///
    /// # Errors
    ///
    /// Returns an error if no tariff table has been loaded.
    pub fn tariffs(&self) -> Result<&TariffTable<'a>, FixtureError> {
        self.tariffs.as_ref().ok_or(FixtureError::NotLoaded("tariffs"))
    }

    /// Get the menu
    ///
    /// # Errors
    ///
    /// Returns an error if no menu has been loaded.
    pub fn menu(&self) -> Result<&Menu<'a>, FixtureError> {
        self.menu.as_ref().ok_or(FixtureError::NotLoaded("menu"))
    }

    /// Get the currency
    ///
    /// # Errors
    ///
    /// Returns an error if nothing has been loaded yet.
    pub fn currency(&self) -> Result<&'static Currency, FixtureError> {
        self.currency.ok_or(FixtureError::NotLoaded("currency"))
    }

    fn set_currency(&mut self, currency: &'static Currency) -> Result<(), FixtureError> {
        match self.currency {
            Some(existing) if existing != currency => Err(FixtureError::CurrencyMismatch(
                existing.iso_alpha_code.to_string(),
                currency.iso_alpha_code.to_string(),
            )),
            _ => {
                self.currency = Some(currency);

                Ok(())
            }
        }
    }
}

impl Default for Fixture<'_> {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse price string (e.g., "8.50 EUR") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY", if the amount cannot
/// be parsed as a decimal, or if the currency code is not recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    let [amount, currency_code] = parts.as_slice() else {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    let minor_units = amount
        .checked_mul(Decimal::new(100, 0))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    Ok((minor_units, parse_currency(currency_code)?))
}

/// Parse an ISO currency code
///
/// # Errors
///
/// Returns an error if the code is not a supported currency.
pub fn parse_currency(code: &str) -> Result<&'static Currency, FixtureError> {
    match code.trim() {
        "EUR" => Ok(EUR),
        "GBP" => Ok(GBP),
        "USD" => Ok(USD),
        other => Err(FixtureError::UnknownCurrency(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, path::Path};

    use testresult::TestResult;

    use crate::tariffs::Resolution;

    use super::*;

    fn write_fixture(base: &Path, category: &str, name: &str, contents: &str) -> TestResult {
        let dir = base.join(category);

        fs::create_dir_all(&dir)?;
        fs::write(dir.join(format!("{name}.yml")), contents)?;

        Ok(())
    }

    #[test]
    fn fixture_loads_tariffs_and_menu() -> TestResult {
        let fixture = Fixture::from_set("dortmund")?;

        let tariffs = fixture.tariffs()?;
        let menu = fixture.menu()?;

        assert_eq!(fixture.currency()?, EUR);
        assert!(matches!(tariffs.resolve("44149"), Resolution::Delivery(_)));
        assert!(!menu.is_empty());

        Ok(())
    }

    #[test]
    fn missing_data_reports_not_loaded() {
        let fixture = Fixture::with_base_path("does-not-exist");

        assert!(matches!(
            fixture.tariffs(),
            Err(FixtureError::NotLoaded("tariffs"))
        ));
        assert!(matches!(fixture.menu(), Err(FixtureError::NotLoaded("menu"))));
        assert!(matches!(
            fixture.currency(),
            Err(FixtureError::NotLoaded("currency"))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let mut fixture = Fixture::with_base_path("does-not-exist");

        assert!(matches!(
            fixture.load_tariffs("nowhere"),
            Err(FixtureError::Io(_))
        ));
    }

    #[test]
    fn mixed_currencies_are_rejected() -> TestResult {
        let dir = tempfile::tempdir()?;

        write_fixture(
            dir.path(),
            "tariffs",
            "mixed",
            "currency: EUR\nzones:\n  - id: campus\n    name: Campus\n    postal_codes: [\"44149\"]\n    delivery_fee: 0.00 EUR\n    minimum_order: 12.00 EUR\n",
        )?;
        write_fixture(
            dir.path(),
            "menu",
            "mixed",
            "currency: GBP\nitems:\n  - id: 20\n    name: Cola\n    price: 2.50 GBP\n",
        )?;

        let mut fixture = Fixture::with_base_path(dir.path());
        fixture.load_tariffs("mixed")?;

        let result = fixture.load_menu("mixed");

        assert!(matches!(
            result,
            Err(FixtureError::CurrencyMismatch(expected, found)) if expected == "EUR" && found == "GBP"
        ));

        Ok(())
    }

    #[test]
    fn invalid_yaml_is_rejected() -> TestResult {
        let dir = tempfile::tempdir()?;

        write_fixture(dir.path(), "tariffs", "broken", "zones: [")?;

        let mut fixture = Fixture::with_base_path(dir.path());

        assert!(matches!(
            fixture.load_tariffs("broken"),
            Err(FixtureError::Yaml(_))
        ));

        Ok(())
    }

    #[test]
    fn parse_price_rounds_to_minor_units() -> TestResult {
        assert_eq!(parse_price("8.50 EUR")?, (850, EUR));
        assert_eq!(parse_price("1 EUR")?, (100, EUR));
        assert_eq!(parse_price("0.005 GBP")?, (0, GBP));

        Ok(())
    }

    #[test]
    fn parse_price_rejects_invalid_format() {
        assert!(matches!(
            parse_price("8.50EUR"),
            Err(FixtureError::InvalidPrice(_))
        ));
        assert!(matches!(
            parse_price("eight EUR"),
            Err(FixtureError::InvalidPrice(_))
        ));
    }

    #[test]
    fn parse_price_rejects_unknown_currency() {
        let result = parse_price("8.50 ABC");

        assert!(matches!(result, Err(FixtureError::UnknownCurrency(code)) if code == "ABC"));
    }
}

//! Delivery Tariffs
//!
//! A tariff table maps five digit postal codes to delivery zones. Each zone carries a delivery
//! fee, a minimum order amount and an optional free-delivery threshold. Customers collecting
//! their order enter [`PICKUP`] instead of a postal code and always get the pickup tariff.
//!
//! Resolution never fails: input that is not a configured postal code resolves to
//! [`Resolution::NotFound`], which callers render as "delivery unavailable".

use std::{fmt, str::FromStr};

use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;
use tracing::debug;

use crate::pricing;

pub mod fees;

pub use fees::FeeQuote;

/// Input value selecting pickup instead of delivery.
pub const PICKUP: &str = "pickup";

/// Zone id of the pickup tariff.
pub const PICKUP_ZONE: &str = "pickup";

/// Errors building a tariff table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TariffError {
    /// A postal code is not exactly five ASCII digits.
    #[error("Invalid postal code: {0:?}")]
    InvalidPostalCode(String),

    /// A postal code is configured for two zones.
    #[error("Postal code {code} is configured for both {existing} and {zone}")]
    DuplicatePostalCode {
        /// The postal code
        code: PostalCode,
        /// Zone that already claimed the code
        existing: String,
        /// Zone being added
        zone: String,
    },

    /// Two zones share an id.
    #[error("Duplicate zone id: {0}")]
    DuplicateZone(String),

    /// A delivery zone lists no postal codes.
    #[error("Zone {0} has no postal codes")]
    NoPostalCodes(String),

    /// An amount is negative.
    #[error("Zone {zone} has a negative {field}")]
    NegativeAmount {
        /// Zone id
        zone: String,
        /// Offending field
        field: &'static str,
    },

    /// An amount is in a different currency than the table (zone, table currency, amount currency).
    #[error("Zone {0} uses currency {2}, but the table uses {1}")]
    CurrencyMismatch(String, &'static str, &'static str),
}

/// A five digit postal code. Leading zeros are significant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PostalCode([u8; 5]);

impl PostalCode {
    /// Parses exactly five ASCII digits, with no surrounding whitespace.
    pub fn parse(raw: &str) -> Option<Self> {
        let digits: [u8; 5] = raw.as_bytes().try_into().ok()?;

        digits.iter().all(u8::is_ascii_digit).then_some(Self(digits))
    }
}

impl FromStr for PostalCode {
    type Err = TariffError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| TariffError::InvalidPostalCode(s.to_string()))
    }
}

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0
            .iter()
            .try_for_each(|&digit| fmt::Write::write_char(f, char::from(digit)))
    }
}

/// Whether a tariff is a delivery zone or the pickup tariff.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TariffKind {
    /// Delivered to a postal code.
    Delivery,

    /// Collected by the customer.
    Pickup,
}

/// Pricing terms of one delivery zone.
#[derive(Clone, Debug, PartialEq)]
pub struct Tariff<'a> {
    id: String,
    name: String,
    kind: TariffKind,
    postal_codes: Vec<PostalCode>,
    delivery_fee: Money<'a, Currency>,
    minimum_order: Money<'a, Currency>,
    free_delivery_threshold: Option<Money<'a, Currency>>,
}

impl<'a> Tariff<'a> {
    /// Create a delivery zone without postal codes or free-delivery threshold.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        delivery_fee: Money<'a, Currency>,
        minimum_order: Money<'a, Currency>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: TariffKind::Delivery,
            postal_codes: Vec::new(),
            delivery_fee,
            minimum_order,
            free_delivery_threshold: None,
        }
    }

    fn pickup(currency: &'a Currency) -> Self {
        Self {
            id: PICKUP_ZONE.to_string(),
            name: "Pickup".to_string(),
            kind: TariffKind::Pickup,
            postal_codes: Vec::new(),
            delivery_fee: pricing::zero(currency),
            minimum_order: pricing::zero(currency),
            free_delivery_threshold: None,
        }
    }

    /// Add postal codes served by this zone.
    #[must_use]
    pub fn with_postal_codes(mut self, codes: impl IntoIterator<Item = PostalCode>) -> Self {
        self.postal_codes.extend(codes);
        self
    }

    /// Waive the delivery fee for subtotals at or above `threshold`.
    #[must_use]
    pub fn with_free_delivery_threshold(mut self, threshold: Money<'a, Currency>) -> Self {
        self.free_delivery_threshold = Some(threshold);
        self
    }

    /// Zone id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Delivery zone or pickup
    pub fn kind(&self) -> TariffKind {
        self.kind
    }

    /// Postal codes served by this zone
    pub fn postal_codes(&self) -> &[PostalCode] {
        &self.postal_codes
    }

    /// Fee charged per order unless delivery is free
    pub fn delivery_fee(&self) -> &Money<'a, Currency> {
        &self.delivery_fee
    }

    /// Smallest subtotal that may be ordered
    pub fn minimum_order(&self) -> &Money<'a, Currency> {
        &self.minimum_order
    }

    /// Subtotal from which delivery is free, if the zone has one
    pub fn free_delivery_threshold(&self) -> Option<&Money<'a, Currency>> {
        self.free_delivery_threshold.as_ref()
    }

    fn validate(&self, currency: &Currency) -> Result<(), TariffError> {
        let amounts = [
            ("delivery fee", Some(&self.delivery_fee)),
            ("minimum order", Some(&self.minimum_order)),
            ("free delivery threshold", self.free_delivery_threshold.as_ref()),
        ];

        for (field, amount) in amounts {
            let Some(amount) = amount else {
                continue;
            };

            pricing::ensure_currency(amount, currency).map_err(|_err| {
                TariffError::CurrencyMismatch(
                    self.id.clone(),
                    currency.iso_alpha_code,
                    amount.currency().iso_alpha_code,
                )
            })?;

            if amount.to_minor_units() < 0 {
                return Err(TariffError::NegativeAmount {
                    zone: self.id.clone(),
                    field,
                });
            }
        }

        if self.postal_codes.is_empty() {
            return Err(TariffError::NoPostalCodes(self.id.clone()));
        }

        Ok(())
    }
}

/// Outcome of resolving customer input against the tariff table.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Resolution<'t, 'a> {
    /// The postal code belongs to a delivery zone.
    Delivery(&'t Tariff<'a>),

    /// The customer collects the order.
    Pickup(&'t Tariff<'a>),

    /// Not a postal code this shop delivers to.
    NotFound,
}

impl<'t, 'a> Resolution<'t, 'a> {
    /// The resolved tariff, if any.
    pub fn tariff(self) -> Option<&'t Tariff<'a>> {
        match self {
            Resolution::Delivery(tariff) | Resolution::Pickup(tariff) => Some(tariff),
            Resolution::NotFound => None,
        }
    }

    /// Whether the input resolved to a tariff.
    pub fn is_found(self) -> bool {
        !matches!(self, Resolution::NotFound)
    }

    /// Whether the input selected pickup.
    pub fn is_pickup(self) -> bool {
        matches!(self, Resolution::Pickup(_))
    }
}

/// Static table of delivery zones, built once at startup.
#[derive(Debug, Clone)]
pub struct TariffTable<'a> {
    zones: Vec<Tariff<'a>>,
    pickup: Tariff<'a>,
    postal_codes: FxHashMap<PostalCode, usize>,
    currency: &'static Currency,
}

impl<'a> TariffTable<'a> {
    /// Create a table with only the pickup tariff.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            zones: Vec::new(),
            pickup: Tariff::pickup(currency),
            postal_codes: FxHashMap::default(),
            currency,
        }
    }

    /// Create a table from a list of delivery zones.
    ///
    /// # Errors
    ///
    /// Returns the first [`TariffError`] raised by [`TariffTable::with_tariff`].
    pub fn with_tariffs(
        tariffs: impl IntoIterator<Item = Tariff<'a>>,
        currency: &'static Currency,
    ) -> Result<Self, TariffError> {
        tariffs
            .into_iter()
            .try_fold(Self::new(currency), Self::with_tariff)
    }

    /// Add a delivery zone.
    ///
    /// # Errors
    ///
    /// - [`TariffError::DuplicateZone`]: the zone id is taken (including by pickup).
    /// - [`TariffError::DuplicatePostalCode`]: a postal code already belongs to another zone.
    /// - [`TariffError::NoPostalCodes`]: the zone lists no postal codes.
    /// - [`TariffError::NegativeAmount`]: an amount is negative.
    /// - [`TariffError::CurrencyMismatch`]: an amount is not in the table currency.
    pub fn with_tariff(mut self, tariff: Tariff<'a>) -> Result<Self, TariffError> {
        if tariff.id == PICKUP_ZONE || self.get(&tariff.id).is_some() {
            return Err(TariffError::DuplicateZone(tariff.id));
        }

        tariff.validate(self.currency)?;

        let index = self.zones.len();

        for &code in &tariff.postal_codes {
            if let Some(existing) = self
                .postal_codes
                .get(&code)
                .and_then(|&existing| self.zones.get(existing))
            {
                return Err(TariffError::DuplicatePostalCode {
                    code,
                    existing: existing.id.clone(),
                    zone: tariff.id.clone(),
                });
            }

            self.postal_codes.insert(code, index);
        }

        self.zones.push(tariff);

        Ok(self)
    }

    /// Resolve raw customer input to a tariff.
    ///
    /// Surrounding whitespace is ignored. [`PICKUP`] resolves to the pickup tariff; anything
    /// else must be a configured five digit postal code. `None` and every other shape of input
    /// resolve to [`Resolution::NotFound`].
    pub fn resolve<'r>(&self, raw: impl Into<Option<&'r str>>) -> Resolution<'_, 'a> {
        let Some(input) = raw.into().map(str::trim) else {
            return Resolution::NotFound;
        };

        if input == PICKUP {
            debug!("resolved pickup tariff");

            return Resolution::Pickup(&self.pickup);
        }

        let resolution = PostalCode::parse(input)
            .and_then(|code| self.postal_codes.get(&code))
            .and_then(|&index| self.zones.get(index))
            .map_or(Resolution::NotFound, Resolution::Delivery);

        debug!(
            postal_code = input,
            zone = resolution.tariff().map(Tariff::id),
            "resolved postal code"
        );

        resolution
    }

    /// Get a delivery zone by id.
    pub fn get(&self, id: &str) -> Option<&Tariff<'a>> {
        self.zones.iter().find(|zone| zone.id == id)
    }

    /// The pickup tariff.
    pub fn pickup(&self) -> &Tariff<'a> {
        &self.pickup
    }

    /// Iterate over the delivery zones in the order they were added.
    pub fn iter(&self) -> impl Iterator<Item = &Tariff<'a>> {
        self.zones.iter()
    }

    /// Number of delivery zones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    /// Check if the table has no delivery zones.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Currency of every amount in the table.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}

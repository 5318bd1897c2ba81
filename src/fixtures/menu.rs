//! Menu Fixtures

use rusty_money::Money;
use serde::Deserialize;
use smallvec::SmallVec;

use crate::{
    fixtures::{FixtureError, parse_currency, parse_price},
    menu::Menu,
    products::{MenuItem, Pricing, ProductId, SizePrice, VariantKey},
};

/// Wrapper for a menu in YAML
#[derive(Debug, Deserialize)]
pub struct MenuFixture {
    /// Currency of every price on the menu (e.g., "EUR")
    pub currency: String,

    /// Menu items in display order
    pub items: Vec<MenuItemFixture>,
}

/// Menu item fixture. Exactly one of `price` and `sizes` must be given.
#[derive(Debug, Deserialize)]
pub struct MenuItemFixture {
    /// Product id
    pub id: u32,

    /// Display name
    pub name: String,

    /// Menu category
    #[serde(default)]
    pub category: Option<String>,

    /// Single price (e.g., "2.50 EUR")
    #[serde(default)]
    pub price: Option<String>,

    /// Prices per size, in display order
    #[serde(default)]
    pub sizes: Vec<SizeFixture>,

    /// Whether a size must be chosen before adding to the cart
    #[serde(default)]
    pub requires_variant_selection: bool,
}

/// Size fixture
#[derive(Debug, Deserialize)]
pub struct SizeFixture {
    /// Size label (e.g., "30cm")
    pub size: String,

    /// Price of the size
    pub price: String,
}

impl MenuFixture {
    /// Build a menu from the fixture
    ///
    /// # Errors
    ///
    /// Returns an error if a price or currency cannot be parsed, or if the menu is invalid.
    pub fn try_into_menu<'a>(self) -> Result<Menu<'a>, FixtureError> {
        let currency = parse_currency(&self.currency)?;

        let items = self
            .items
            .into_iter()
            .map(MenuItem::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Menu::with_items(items, currency)?)
    }
}

impl TryFrom<MenuItemFixture> for MenuItem<'_> {
    type Error = FixtureError;

    fn try_from(fixture: MenuItemFixture) -> Result<Self, Self::Error> {
        let money = |s: &str| {
            parse_price(s).map(|(minor_units, currency)| Money::from_minor(minor_units, currency))
        };

        let pricing = match (fixture.price.as_deref(), fixture.sizes.is_empty()) {
            (Some(price), true) => Pricing::Single(money(price)?),
            (None, false) => Pricing::Sized(
                fixture
                    .sizes
                    .iter()
                    .map(|size| {
                        Ok(SizePrice {
                            variant: VariantKey::from(size.size.as_str()),
                            price: money(&size.price)?,
                        })
                    })
                    .collect::<Result<SmallVec<_>, FixtureError>>()?,
            ),
            _ => return Err(FixtureError::InvalidPricing(fixture.id)),
        };

        Ok(MenuItem {
            id: ProductId::new(fixture.id),
            name: fixture.name,
            category: fixture.category,
            pricing,
            requires_variant_selection: fixture.requires_variant_selection,
        })
    }
}

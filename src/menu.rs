//! Menu

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use thiserror::Error;

use crate::products::{MenuItem, Pricing, ProductId};

/// Errors related to menu construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MenuError {
    /// Two menu items share a product id.
    #[error("Duplicate product id {0}")]
    DuplicateProduct(ProductId),

    /// A menu item is priced in a different currency than the menu (product, item currency, menu currency).
    #[error("Product {0} has currency {1}, but menu has currency {2}")]
    CurrencyMismatch(ProductId, &'static str, &'static str),

    /// A sized menu item lists no sizes.
    #[error("Product {0} has no sizes")]
    NoSizes(ProductId),
}

/// Menu items in display order, indexed by product id.
#[derive(Debug, Clone)]
pub struct Menu<'a> {
    items: Vec<MenuItem<'a>>,
    index: FxHashMap<ProductId, usize>,
    currency: &'static Currency,
}

impl<'a> Menu<'a> {
    /// Create an empty menu.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Menu {
            items: Vec::new(),
            index: FxHashMap::default(),
            currency,
        }
    }

    /// Create a menu with the given items.
    ///
    /// # Errors
    ///
    /// Returns the first [`MenuError`] raised by [`Menu::push`].
    pub fn with_items(
        items: impl IntoIterator<Item = MenuItem<'a>>,
        currency: &'static Currency,
    ) -> Result<Self, MenuError> {
        let mut menu = Self::new(currency);

        items.into_iter().try_for_each(|item| menu.push(item))?;

        Ok(menu)
    }

    /// Append an item to the menu.
    ///
    /// # Errors
    ///
    /// - [`MenuError::DuplicateProduct`]: the product id is already on the menu.
    /// - [`MenuError::CurrencyMismatch`]: a price is not in the menu currency.
    /// - [`MenuError::NoSizes`]: a sized item lists no sizes.
    pub fn push(&mut self, item: MenuItem<'a>) -> Result<(), MenuError> {
        if self.index.contains_key(&item.id) {
            return Err(MenuError::DuplicateProduct(item.id));
        }

        if let Pricing::Sized(sizes) = &item.pricing
            && sizes.is_empty()
        {
            return Err(MenuError::NoSizes(item.id));
        }

        if let Some(price) = item
            .pricing
            .prices()
            .find(|price| price.currency() != self.currency)
        {
            return Err(MenuError::CurrencyMismatch(
                item.id,
                price.currency().iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        self.index.insert(item.id, self.items.len());
        self.items.push(item);

        Ok(())
    }

    /// Get a menu item by product id.
    pub fn get(&self, id: ProductId) -> Option<&MenuItem<'a>> {
        self.index.get(&id).and_then(|&index| self.items.get(index))
    }

    /// Iterate over the items in display order.
    pub fn iter(&self) -> impl Iterator<Item = &MenuItem<'a>> {
        self.items.iter()
    }

    /// Get the number of items on the menu.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the menu is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the currency of the menu.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}

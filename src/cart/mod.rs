//! Cart
//!
//! The cart keeps one line per product and size. Adding a size that is already in the cart
//! increases its quantity; adding another size of the same product opens a new line.

use rusty_money::{Money, iso::Currency};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    pricing::{self, PricingError},
    products::{MenuItem, ProductError, ProductId, VariantKey},
};

pub mod line_item;

pub use line_item::LineItem;

/// Errors rejecting a cart mutation. The cart is left unchanged.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// Quantities must be at least one.
    #[error("Invalid quantity {0}, must be at least 1")]
    InvalidQuantity(u32),

    /// Unit prices must not be negative.
    #[error("Product {0} has a negative unit price")]
    NegativePrice(ProductId),

    /// Money arithmetic or currency mismatch error.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// The product's price could not be resolved.
    #[error(transparent)]
    Product(#[from] ProductError),
}

/// Outcome of decreasing a product in the cart.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decrease {
    /// The line lost one unit and is still in the cart.
    Decremented {
        /// Quantity left on the line
        remaining: u32,
    },

    /// The line held a single unit and was removed.
    Removed,

    /// Nothing in the cart matched.
    Absent,
}

/// Cart
#[derive(Debug, Clone)]
pub struct Cart<'a> {
    lines: Vec<LineItem<'a>>,
    currency: &'static Currency,
}

impl<'a> Cart<'a> {
    /// Create an empty cart.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            lines: Vec::new(),
            currency,
        }
    }

    /// Add `quantity` units of a product size at `unit_price`.
    ///
    /// If the size is already in the cart its quantity grows and the stored unit price is kept,
    /// whatever `unit_price` is passed now. Otherwise a new line is appended.
    ///
    /// Returns the quantity of the line after the addition.
    ///
    /// # Errors
    ///
    /// - [`CartError::InvalidQuantity`]: `quantity` is zero.
    /// - [`CartError::NegativePrice`]: `unit_price` is negative.
    /// - [`CartError::Pricing`]: currency mismatch, or the totals overflow.
    pub fn add_item(
        &mut self,
        product: ProductId,
        variant: Option<&str>,
        unit_price: Money<'a, Currency>,
        quantity: u32,
    ) -> Result<u32, CartError> {
        if quantity == 0 {
            warn!(%product, ?variant, "rejected cart addition with zero quantity");

            return Err(CartError::InvalidQuantity(quantity));
        }

        pricing::ensure_currency(&unit_price, self.currency)?;

        if unit_price.to_minor_units() < 0 {
            warn!(%product, ?variant, "rejected cart addition with negative price");

            return Err(CartError::NegativePrice(product));
        }

        let position = self.position(product, variant);

        let effective_unit = position
            .and_then(|index| self.lines.get(index))
            .map_or(unit_price, |line| *line.unit_price());

        let added = pricing::multiply(&effective_unit, quantity)?;

        pricing::add(&self.try_total()?, &added)?;

        let updated = match position.and_then(|index| self.lines.get_mut(index)) {
            Some(line) => line.increase(quantity)?,
            None => {
                self.lines
                    .push(LineItem::new(product, variant, unit_price, quantity)?);

                quantity
            }
        };

        debug!(%product, ?variant, quantity = updated, "added to cart");

        Ok(updated)
    }

    /// Add a menu item, resolving the unit price from its pricing.
    ///
    /// # Errors
    ///
    /// - [`CartError::Product`]: the size is missing, unknown or not offered.
    /// - Any error from [`Cart::add_item`].
    pub fn add_menu_item(
        &mut self,
        item: &MenuItem<'a>,
        variant: Option<&str>,
        quantity: u32,
    ) -> Result<u32, CartError> {
        let (variant, unit_price) = item.unit_price(variant)?;

        self.add_item(item.id, variant.map(VariantKey::as_str), unit_price, quantity)
    }

    /// Remove one unit of a product, whichever size comes first in the cart.
    ///
    /// With several sizes of the product in the cart the earliest added line is targeted.
    pub fn decrease_by_product(&mut self, product: ProductId) -> Decrease {
        let position = self.lines.iter().position(|line| line.product() == product);

        self.decrease_at(position)
    }

    /// Remove one unit of exactly this product size.
    pub fn decrease(&mut self, product: ProductId, variant: Option<&str>) -> Decrease {
        let position = self.position(product, variant);

        self.decrease_at(position)
    }

    /// Remove the line for this product size, returning it if it was present.
    pub fn remove_item(&mut self, product: ProductId, variant: Option<&str>) -> Option<LineItem<'a>> {
        let position = self.position(product, variant)?;
        let removed = self.lines.remove(position);

        debug!(%product, ?variant, "removed from cart");

        Some(removed)
    }

    /// Quantity of exactly this product size; zero if absent.
    pub fn get_quantity(&self, product: ProductId, variant: Option<&str>) -> u32 {
        self.get(product, variant).map_or(0, LineItem::quantity)
    }

    /// Quantity of a product summed across all of its sizes.
    pub fn total_quantity_for_product(&self, product: ProductId) -> u32 {
        self.lines
            .iter()
            .filter(|line| line.product() == product)
            .map(LineItem::quantity)
            .fold(0, u32::saturating_add)
    }

    /// Number of units in the cart across all lines.
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .map(LineItem::quantity)
            .fold(0, u32::saturating_add)
    }

    /// Sum of all line totals.
    pub fn total(&self) -> Money<'a, Currency> {
        let minor = self
            .lines
            .iter()
            .map(|line| line.total_price().to_minor_units())
            .fold(0, i64::saturating_add);

        Money::from_minor(minor, self.currency)
    }

    /// Get the line for this product size.
    pub fn get(&self, product: ProductId, variant: Option<&str>) -> Option<&LineItem<'a>> {
        self.lines.iter().find(|line| line.matches(product, variant))
    }

    /// Iterate over the lines in the order they were first added.
    pub fn iter(&self) -> impl Iterator<Item = &LineItem<'a>> {
        self.lines.iter()
    }

    /// Remove every line, e.g. once the order has been submitted.
    pub fn clear(&mut self) {
        self.lines.clear();

        debug!("cleared cart");
    }

    /// Get the number of lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Get the currency of the cart.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    fn position(&self, product: ProductId, variant: Option<&str>) -> Option<usize> {
        self.lines
            .iter()
            .position(|line| line.matches(product, variant))
    }

    fn try_total(&self) -> Result<Money<'a, Currency>, PricingError> {
        pricing::total(self.lines.iter().map(LineItem::total_price), self.currency)
    }

    fn decrease_at(&mut self, position: Option<usize>) -> Decrease {
        let Some(index) = position else {
            return Decrease::Absent;
        };

        let Some(line) = self.lines.get_mut(index) else {
            return Decrease::Absent;
        };

        let product = line.product();

        let outcome = if line.quantity() > 1 {
            Decrease::Decremented {
                remaining: line.decrement(),
            }
        } else {
            self.lines.remove(index);

            Decrease::Removed
        };

        debug!(%product, ?outcome, "decreased cart line");

        outcome
    }
}

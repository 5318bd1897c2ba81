//! Line Items

use rusty_money::{Money, iso::Currency};

use crate::{
    pricing::{self, PricingError},
    products::{ProductId, VariantKey},
};

/// One product variant in the cart with its quantity.
///
/// The quantity is always at least one; a line that would reach zero is removed by the cart.
#[derive(Clone, Debug, PartialEq)]
pub struct LineItem<'a> {
    product: ProductId,
    variant: Option<VariantKey>,
    quantity: u32,
    unit_price: Money<'a, Currency>,
    total_price: Money<'a, Currency>,
}

impl<'a> LineItem<'a> {
    pub(crate) fn new(
        product: ProductId,
        variant: Option<&str>,
        unit_price: Money<'a, Currency>,
        quantity: u32,
    ) -> Result<Self, PricingError> {
        Ok(Self {
            product,
            variant: variant.map(VariantKey::from),
            quantity,
            total_price: pricing::multiply(&unit_price, quantity)?,
            unit_price,
        })
    }

    /// Returns the product of the line.
    pub fn product(&self) -> ProductId {
        self.product
    }

    /// Returns the size of the line, if the product is sold in sizes.
    pub fn variant(&self) -> Option<&str> {
        self.variant.as_ref().map(VariantKey::as_str)
    }

    /// Returns the quantity.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Returns the price of a single unit, fixed when the line was first added.
    pub fn unit_price(&self) -> &Money<'a, Currency> {
        &self.unit_price
    }

    /// Returns `unit_price × quantity`.
    pub fn total_price(&self) -> &Money<'a, Currency> {
        &self.total_price
    }

    /// Whether this line holds exactly the given product and size.
    pub fn matches(&self, product: ProductId, variant: Option<&str>) -> bool {
        self.product == product && self.variant() == variant
    }

    pub(crate) fn increase(&mut self, quantity: u32) -> Result<u32, PricingError> {
        let quantity = self
            .quantity
            .checked_add(quantity)
            .ok_or(PricingError::Overflow)?;

        self.total_price = pricing::multiply(&self.unit_price, quantity)?;
        self.quantity = quantity;

        Ok(quantity)
    }

    /// Decrements a line holding more than one unit. Lines at one unit are left untouched.
    pub(crate) fn decrement(&mut self) -> u32 {
        if self.quantity > 1 {
            self.quantity -= 1;

            let minor = self
                .unit_price
                .to_minor_units()
                .saturating_mul(i64::from(self.quantity));

            self.total_price = Money::from_minor(minor, self.unit_price.currency());
        }

        self.quantity
    }
}

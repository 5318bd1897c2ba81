//! Checkout
//!
//! Combines the cart subtotal with the delivery terms of the resolved zone. Building the order
//! message for submission is left to the caller; this module only answers what the order costs
//! and whether it may be submitted.

use std::io;

use rusty_money::{Money, iso::Currency};
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    cart::Cart,
    menu::Menu,
    pricing::{self, PricingError},
    products::ProductId,
    tariffs::{FeeQuote, Tariff, TariffKind},
};

/// Errors that can occur when summarising an order.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Money arithmetic or currency mismatch error.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// A cart line refers to a product that is not on the menu.
    #[error("Product {0} is not on the menu")]
    MissingProduct(ProductId),

    /// Writing the summary failed.
    #[error("Failed to write order summary: {0}")]
    Io(#[from] io::Error),
}

/// Totals of an order for one delivery zone or pickup.
#[derive(Debug, Clone)]
pub struct OrderSummary<'a> {
    zone: String,
    kind: TariffKind,
    subtotal: Money<'a, Currency>,
    quote: FeeQuote<'a>,
    total: Money<'a, Currency>,
    empty: bool,
}

impl<'a> OrderSummary<'a> {
    /// Summarise `cart` under `tariff`.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckoutError::Pricing`] if the cart and tariff use different currencies or
    /// the total overflows.
    pub fn new(cart: &Cart<'a>, tariff: &Tariff<'a>) -> Result<Self, CheckoutError> {
        let subtotal = cart.total();
        let quote = tariff.compute_fee(&subtotal);
        let total = pricing::add(&subtotal, quote.fee())?;

        Ok(Self {
            zone: tariff.name().to_string(),
            kind: tariff.kind(),
            subtotal,
            quote,
            total,
            empty: cart.is_empty(),
        })
    }

    /// Name of the delivery zone
    pub fn zone(&self) -> &str {
        &self.zone
    }

    /// Whether the order is delivered or collected
    pub fn kind(&self) -> TariffKind {
        self.kind
    }

    /// Sum of all cart lines
    pub fn subtotal(&self) -> Money<'a, Currency> {
        self.subtotal
    }

    /// Delivery terms for the subtotal
    pub fn quote(&self) -> &FeeQuote<'a> {
        &self.quote
    }

    /// Subtotal plus delivery fee
    pub fn total(&self) -> Money<'a, Currency> {
        self.total
    }

    /// Whether the order may be submitted: the cart has items and the minimum is met.
    pub fn can_submit(&self) -> bool {
        !self.empty && self.quote.meets_minimum()
    }

    /// Writes the cart lines and order totals as a console table.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::MissingProduct`]: a cart line is not on the menu.
    /// - [`CheckoutError::Io`]: writing to `out` failed.
    pub fn write_to(
        &self,
        mut out: impl io::Write,
        cart: &Cart<'_>,
        menu: &Menu<'_>,
    ) -> Result<(), CheckoutError> {
        let mut builder = Builder::default();

        builder.push_record(["Item", "Size", "Qty", "Unit Price", "Total"]);

        for line in cart.iter() {
            let item = menu
                .get(line.product())
                .ok_or(CheckoutError::MissingProduct(line.product()))?;

            builder.push_record([
                item.name.clone(),
                line.variant().unwrap_or_default().to_string(),
                line.quantity().to_string(),
                line.unit_price().to_string(),
                line.total_price().to_string(),
            ]);
        }

        let mut table = builder.build();

        table.with(Style::rounded());
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(2..5), Alignment::right());

        writeln!(out, "\n{table}")?;

        self.write_totals(&mut out)
    }

    fn write_totals(&self, out: &mut impl io::Write) -> Result<(), CheckoutError> {
        let delivery = match self.kind {
            TariffKind::Pickup => "pickup".to_string(),
            TariffKind::Delivery if self.quote.is_free_delivery() => "free".to_string(),
            TariffKind::Delivery => self.quote.fee().to_string(),
        };

        let mut lines = vec![
            ("Zone:", self.zone.clone()),
            ("Subtotal:", self.subtotal.to_string()),
            ("Delivery:", delivery),
            ("Total:", self.total.to_string()),
        ];

        if !self.quote.meets_minimum() {
            lines.push(("Missing:", self.quote.missing_amount().to_string()));
        }

        if let Some(remaining) = self.quote.amount_until_free_delivery() {
            lines.push(("Free delivery in:", remaining.to_string()));
        }

        let label_width = lines.iter().map(|(label, _)| label.len()).max().unwrap_or(0);

        for (label, value) in lines {
            writeln!(out, " {label:>label_width$}  {value}")?;
        }

        writeln!(out)?;

        Ok(())
    }
}

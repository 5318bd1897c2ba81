//! Pizzeria prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError, Decrease, LineItem},
    checkout::{CheckoutError, OrderSummary},
    fixtures::{Fixture, FixtureError},
    menu::{Menu, MenuError},
    pricing::PricingError,
    products::{MenuItem, Pricing, ProductError, ProductId, SizePrice, VariantKey},
    tariffs::{
        FeeQuote, PICKUP, PICKUP_ZONE, PostalCode, Resolution, Tariff, TariffError, TariffKind,
        TariffTable,
    },
};

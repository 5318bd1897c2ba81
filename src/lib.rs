//! Pizzeria
//!
//! Delivery tariff resolution and cart consolidation for a pizza storefront.

pub mod cart;
pub mod checkout;
pub mod fixtures;
pub mod menu;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod tariffs;
pub mod utils;

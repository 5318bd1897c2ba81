//! Checkout Example
//!
//! Fills a cart from the fixture menu and prints the order totals for a postal code.
//!
//! Use `-f` to load a fixture set by name
//! Use `-p` to choose the postal code (or `pickup`)
//! Use `-a PRODUCT[:SIZE][xQTY]` to add items, repeatable

use std::io;

use anyhow::{Result, anyhow};
use clap::Parser;
use pizzeria::{
    cart::Cart,
    checkout::OrderSummary,
    fixtures::Fixture,
    tariffs::Resolution,
    utils::{ExampleCheckoutArgs, LogFormat, LoggingArgs},
};
use tracing_subscriber::EnvFilter;

fn init_logging(args: &LoggingArgs) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_level.as_str()));

    match args.log_format {
        LogFormat::Compact => tracing_subscriber::fmt()
            .compact()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init(),
    }
}

/// Checkout Example
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    let args = ExampleCheckoutArgs::parse();

    init_logging(&args.logging);

    let fixture = Fixture::from_set(&args.fixture)?;
    let menu = fixture.menu()?;
    let tariffs = fixture.tariffs()?;

    let mut cart = Cart::new(fixture.currency()?);

    for entry in &args.items {
        let item = menu
            .get(entry.product)
            .ok_or_else(|| anyhow!("Product {} is not on the menu", entry.product))?;

        cart.add_menu_item(item, entry.variant.as_deref(), entry.quantity)?;
    }

    let tariff = match tariffs.resolve(args.postal_code.as_str()) {
        Resolution::Delivery(tariff) | Resolution::Pickup(tariff) => tariff,
        Resolution::NotFound => {
            println!("We do not deliver to {}.", args.postal_code);

            return Ok(());
        }
    };

    let summary = OrderSummary::new(&cart, tariff)?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    summary.write_to(&mut handle, &cart, menu)?;

    if summary.can_submit() {
        println!("Order can be submitted.");
    } else {
        println!("Order cannot be submitted yet.");
    }

    Ok(())
}

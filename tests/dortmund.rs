//! Integration tests for the Dortmund fixture set.
//!
//! Zones:
//!
//! - Campus (44149): no delivery fee, €12.00 minimum
//! - Standard (44225, ...): €1.00 fee, €15.00 minimum, free from €50.00
//! - Outer districts (44265, ...): €2.50 fee, €20.00 minimum, free from €60.00
//!
//! Margherita (product 1) comes in small (€8.50), medium (€10.50) and large (€13.00).

use rusty_money::{
    Money,
    iso::{Currency, EUR},
};
use testresult::TestResult;

use pizzeria::{
    cart::{Cart, Decrease},
    checkout::OrderSummary,
    fixtures::Fixture,
    products::ProductId,
    tariffs::{PICKUP, Resolution, TariffKind},
};

const MARGHERITA: ProductId = ProductId::new(1);
const COLA: ProductId = ProductId::new(20);

fn eur<'a>(minor: i64) -> Money<'a, Currency> {
    Money::from_minor(minor, EUR)
}

#[test]
fn campus_has_free_delivery_but_a_minimum() -> TestResult {
    let fixture = Fixture::from_set("dortmund")?;
    let tariffs = fixture.tariffs()?;

    let Resolution::Delivery(campus) = tariffs.resolve("44149") else {
        return Err("expected campus delivery zone".into());
    };

    assert_eq!(campus.id(), "campus");
    assert_eq!(campus.delivery_fee(), &eur(0));
    assert_eq!(campus.minimum_order(), &eur(1200));

    let quote = campus.compute_fee(&eur(1000));

    assert!(!quote.meets_minimum());
    assert_eq!(quote.missing_amount(), &eur(200));
    assert_eq!(quote.fee(), &eur(0));
    assert!(quote.is_free_delivery());

    Ok(())
}

#[test]
fn standard_zone_waives_fee_from_threshold() -> TestResult {
    let fixture = Fixture::from_set("dortmund")?;
    let tariffs = fixture.tariffs()?;

    let standard = tariffs.resolve("44225").tariff().ok_or("expected standard")?;

    assert_eq!(standard.id(), "standard");
    assert_eq!(standard.delivery_fee(), &eur(100));
    assert_eq!(standard.free_delivery_threshold(), Some(&eur(5000)));

    let below = standard.compute_fee(&eur(2500));

    assert_eq!(below.fee(), &eur(100));
    assert!(!below.is_free_delivery());

    let at = standard.compute_fee(&eur(5000));

    assert_eq!(at.fee(), &eur(0));
    assert!(at.is_free_delivery());

    Ok(())
}

#[test]
fn unknown_postal_code_is_not_found() -> TestResult {
    let fixture = Fixture::from_set("dortmund")?;

    assert_eq!(fixture.tariffs()?.resolve("99999"), Resolution::NotFound);

    Ok(())
}

#[test]
fn sizes_of_one_pizza_are_separate_lines() -> TestResult {
    let mut cart = Cart::new(EUR);

    cart.add_item(MARGHERITA, Some("small"), eur(850), 1)?;
    cart.add_item(MARGHERITA, Some("medium"), eur(1050), 1)?;
    cart.add_item(MARGHERITA, Some("medium"), eur(1050), 1)?;

    assert_eq!(cart.len(), 2);

    let medium = cart
        .get(MARGHERITA, Some("medium"))
        .ok_or("expected medium line")?;

    assert_eq!(medium.quantity(), 2);
    assert_eq!(medium.total_price(), &eur(2100));
    assert_eq!(cart.total_quantity_for_product(MARGHERITA), 3);

    Ok(())
}

#[test]
fn decreasing_one_size_leaves_the_other() -> TestResult {
    let mut cart = Cart::new(EUR);

    cart.add_item(MARGHERITA, Some("small"), eur(850), 1)?;
    cart.add_item(MARGHERITA, Some("medium"), eur(1050), 2)?;

    assert_eq!(
        cart.decrease(MARGHERITA, Some("medium")),
        Decrease::Decremented { remaining: 1 }
    );
    assert_eq!(cart.decrease(MARGHERITA, Some("medium")), Decrease::Removed);

    assert_eq!(cart.get_quantity(MARGHERITA, Some("medium")), 0);
    assert_eq!(cart.get_quantity(MARGHERITA, Some("small")), 1);

    assert_eq!(cart.decrease_by_product(MARGHERITA), Decrease::Removed);
    assert!(cart.is_empty());

    Ok(())
}

#[test]
fn menu_prices_flow_into_the_order_total() -> TestResult {
    let fixture = Fixture::from_set("dortmund")?;
    let menu = fixture.menu()?;
    let tariffs = fixture.tariffs()?;

    let margherita = menu.get(MARGHERITA).ok_or("expected margherita")?;
    let cola = menu.get(COLA).ok_or("expected cola")?;

    let mut cart = Cart::new(fixture.currency()?);

    cart.add_menu_item(margherita, Some("medium"), 1)?;
    cart.add_menu_item(cola, None, 2)?;

    let standard = tariffs.resolve("44227").tariff().ok_or("expected standard")?;
    let summary = OrderSummary::new(&cart, standard)?;

    assert_eq!(summary.subtotal(), eur(1550));
    assert_eq!(summary.total(), eur(1650));
    assert!(summary.can_submit());
    assert_eq!(summary.quote().amount_until_free_delivery(), Some(&eur(3450)));

    Ok(())
}

#[test]
fn pizza_without_size_is_rejected() -> TestResult {
    let fixture = Fixture::from_set("dortmund")?;
    let margherita = fixture.menu()?.get(MARGHERITA).ok_or("expected margherita")?;

    let mut cart = Cart::new(EUR);

    assert!(cart.add_menu_item(margherita, None, 1).is_err());
    assert!(cart.is_empty());

    Ok(())
}

#[test]
fn pickup_order_has_no_fee_or_minimum() -> TestResult {
    let fixture = Fixture::from_set("dortmund")?;
    let menu = fixture.menu()?;

    let cola = menu.get(COLA).ok_or("expected cola")?;

    let mut cart = Cart::new(EUR);
    cart.add_menu_item(cola, None, 1)?;

    let pickup = fixture.tariffs()?.resolve(PICKUP);

    assert!(pickup.is_pickup());

    let summary = OrderSummary::new(&cart, pickup.tariff().ok_or("expected pickup")?)?;

    assert_eq!(summary.kind(), TariffKind::Pickup);
    assert_eq!(summary.total(), eur(250));
    assert!(summary.can_submit());

    Ok(())
}

#[test]
fn outer_zone_summary_renders() -> TestResult {
    let fixture = Fixture::from_set("dortmund")?;
    let menu = fixture.menu()?;

    let mut cart = Cart::new(EUR);
    cart.add_menu_item(menu.get(MARGHERITA).ok_or("expected margherita")?, Some("large"), 1)?;

    let outer = fixture.tariffs()?.resolve(" 44269 ").tariff().ok_or("expected outer")?;
    let summary = OrderSummary::new(&cart, outer)?;

    let mut out = Vec::new();
    summary.write_to(&mut out, &cart, menu)?;

    let output = String::from_utf8(out)?;

    assert!(output.contains("Margherita"));
    assert!(output.contains("large"));
    assert!(output.contains("Outer Districts"));
    assert!(output.contains("Missing:"));
    assert!(!summary.can_submit());

    Ok(())
}

use anyhow::Context;
use rust_decimal::Decimal;

use orderflow_app::{App, AppConfig};
use orderflow_catalog::NewProduct;
use orderflow_core::{Entity, money};
use orderflow_orders::PricingPolicy;

fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env();
    orderflow_observability::init_with(config.log_format());

    let app = App::new(config);
    tracing::info!(
        categories = ?app.products.registry().categories().collect::<Vec<_>>(),
        "product templates loaded"
    );

    let customer = app
        .customers
        .create_customer("Grace Hopper", "grace@example.com")
        .context("registering demo customer")?;

    let laptop = app.products.create_product(NewProduct {
        name: "Laptop".to_string(),
        price: Decimal::new(99_999, 2),
        category: "ELECTRONICS".to_string(),
        stock: 10,
        description: None,
    })?;
    let book = app.products.create_product(NewProduct {
        name: "The Rust Programming Language".to_string(),
        price: Decimal::new(3_999, 2),
        category: "BOOKS".to_string(),
        stock: 25,
        description: None,
    })?;

    let order = app.orders.create_order(customer.id())?;
    app.orders.add_item(order.id(), laptop.id(), 1, None)?;
    app.orders
        .add_item(order.id(), book.id(), 2, Some(&PricingPolicy::default_seasonal()))?;
    app.orders.process_order(order.id())?;
    let order = app.orders.ship_order(order.id())?;

    let customer = app
        .customers
        .get_customer(customer.id())
        .context("demo customer disappeared")?;
    tracing::info!(
        customer_id = %customer.id(),
        tier = %customer.tier(),
        total_purchases = %money::display(customer.total_purchases()),
        revenue = %money::display(app.analytics.processed_revenue()),
        currency = %app.config.default_currency,
        "walkthrough finished"
    );

    println!("{}", serde_json::to_string_pretty(&order)?);
    Ok(())
}

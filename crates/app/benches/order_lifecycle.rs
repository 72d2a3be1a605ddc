use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use orderflow_app::{App, AppConfig};
use orderflow_catalog::NewProduct;
use orderflow_core::Entity;

fn full_lifecycle(c: &mut Criterion) {
    let app = App::new(AppConfig::default());
    let customer = app
        .customers
        .create_customer("Bench", "bench@example.com")
        .unwrap();
    let product = app
        .products
        .create_product(NewProduct {
            name: "Widget".to_string(),
            price: Decimal::new(1_999, 2),
            category: "GENERAL".to_string(),
            stock: u32::MAX,
            description: None,
        })
        .unwrap();

    c.bench_function("create_add_process_ship", |b| {
        b.iter(|| {
            let order = app.orders.create_order(customer.id()).unwrap();
            app.orders
                .add_item(order.id(), product.id(), black_box(3), None)
                .unwrap();
            app.orders.process_order(order.id()).unwrap();
            black_box(app.orders.ship_order(order.id()).unwrap())
        })
    });
}

criterion_group!(benches, full_lifecycle);
criterion_main!(benches);

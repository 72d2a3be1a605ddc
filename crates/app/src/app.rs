//! Composition root: stores, services and built-in subscribers wired together.

use std::sync::Arc;

use orderflow_catalog::{CategoryRegistry, Product};
use orderflow_customers::Customer;
use orderflow_infra::InMemoryRepository;
use orderflow_orders::{EmailNotifier, InventoryAuditor, Order, SalesAnalytics};

use crate::config::AppConfig;
use crate::services::{CustomerService, OrderService, ProductService};

pub type ProductStore = Arc<InMemoryRepository<Product>>;
pub type CustomerStore = Arc<InMemoryRepository<Customer>>;
pub type OrderStore = Arc<InMemoryRepository<Order>>;

/// Single-process application over in-memory stores.
pub struct App {
    pub config: AppConfig,
    pub products: ProductService<ProductStore>,
    pub customers: CustomerService<CustomerStore>,
    pub orders: OrderService<OrderStore, ProductStore, CustomerStore>,
    /// Also attached to the order notifier; kept here so callers can read its counters.
    pub analytics: Arc<SalesAnalytics>,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let product_store: ProductStore = Arc::new(InMemoryRepository::new());
        let customer_store: CustomerStore = Arc::new(InMemoryRepository::new());
        let order_store: OrderStore = Arc::new(InMemoryRepository::new());

        let products = ProductService::new(product_store.clone(), CategoryRegistry::with_defaults());
        let customers = CustomerService::new(customer_store.clone());
        let mut orders = OrderService::new(order_store, product_store, customer_store)
            .with_max_items_per_order(config.max_items_per_order);

        let analytics = Arc::new(SalesAnalytics::new());
        orders.subscribe(Arc::new(EmailNotifier));
        orders.subscribe(Arc::new(InventoryAuditor));
        orders.subscribe(analytics.clone());

        tracing::info!(
            app = %config.app_name,
            version = %config.version,
            currency = %config.default_currency,
            subscribers = orders.notifier().len(),
            "application assembled"
        );

        Self {
            config,
            products,
            customers,
            orders,
            analytics,
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

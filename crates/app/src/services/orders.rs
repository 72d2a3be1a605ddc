//! Order orchestration: the only place that touches products, customers and orders in
//! one operation.
//!
//! Every operation validates everything it can before the first write. Operations that
//! write two entities persist the "other" entity first (product for `add_item`, customer
//! for `process_order`) and the order second; when the order write fails, the first
//! entity is put back from its snapshot and no notification is sent.

use std::sync::Arc;

use chrono::Utc;

use orderflow_catalog::Product;
use orderflow_core::{
    CustomerId, DomainError, Entity, EntityKind, OrderId, ProductId, money,
};
use orderflow_customers::Customer;
use orderflow_events::{Notifier, Subscriber};
use orderflow_infra::{CustomerRepository, OrderRepository, ProductRepository, Repository};
use orderflow_orders::{
    Order, OrderEvent, OrderEventKind, OrderLine, OrderStatus, PricingPolicy,
};

use crate::config::DEFAULT_MAX_ITEMS_PER_ORDER;
use crate::error::{ServiceError, ServiceResult};

pub struct OrderService<O, P, C> {
    orders: O,
    products: P,
    customers: C,
    notifier: Notifier<OrderEvent>,
    pricing: PricingPolicy,
    max_items_per_order: usize,
}

impl<O, P, C> OrderService<O, P, C>
where
    O: OrderRepository,
    P: ProductRepository,
    C: CustomerRepository,
{
    pub fn new(orders: O, products: P, customers: C) -> Self {
        Self {
            orders,
            products,
            customers,
            notifier: Notifier::new(),
            pricing: PricingPolicy::default(),
            max_items_per_order: DEFAULT_MAX_ITEMS_PER_ORDER,
        }
    }

    pub fn with_max_items_per_order(mut self, max: usize) -> Self {
        self.max_items_per_order = max;
        self
    }

    /// Policy used by `add_item` when the caller does not pass one.
    pub fn pricing_policy(&self) -> &PricingPolicy {
        &self.pricing
    }

    pub fn set_pricing_policy(&mut self, policy: PricingPolicy) {
        tracing::info!(policy = policy.name(), "default pricing policy changed");
        self.pricing = policy;
    }

    pub fn notifier(&self) -> &Notifier<OrderEvent> {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut Notifier<OrderEvent> {
        &mut self.notifier
    }

    /// Shorthand for `notifier_mut().attach(..)`.
    pub fn subscribe(&mut self, subscriber: Arc<dyn Subscriber<OrderEvent>>) -> bool {
        self.notifier.attach(subscriber)
    }

    /// Open a PENDING order for an existing customer.
    ///
    /// The customer's current tier discount is frozen on the order.
    pub fn create_order(&self, customer_id: CustomerId) -> ServiceResult<Order> {
        let customer = self.load_customer(customer_id)?;

        let order = Order::new(customer_id, customer.discount_rate(), Utc::now());
        let order = self.orders.insert(order)?;

        tracing::info!(
            order_id = %order.id(),
            customer_id = %customer_id,
            discount = %order.discount_percentage(),
            "order created"
        );
        self.publish(OrderEventKind::Created, &order);
        Ok(order)
    }

    /// Add `quantity` units of a product to a PENDING order.
    ///
    /// The unit price comes from `pricing`, or from the service's default policy, applied
    /// to a single unit. Stock is taken from the product immediately.
    pub fn add_item(
        &self,
        order_id: OrderId,
        product_id: ProductId,
        quantity: u32,
        pricing: Option<&PricingPolicy>,
    ) -> ServiceResult<Order> {
        self.try_add_item(order_id, product_id, quantity, pricing)
            .inspect_err(|err| {
                tracing::warn!(
                    order_id = %order_id,
                    product_id = %product_id,
                    quantity,
                    error = %err,
                    "add_item rejected"
                );
            })
    }

    fn try_add_item(
        &self,
        order_id: OrderId,
        product_id: ProductId,
        quantity: u32,
        pricing: Option<&PricingPolicy>,
    ) -> ServiceResult<Order> {
        let mut order = self.load_order(order_id)?;
        order.ensure_modifiable()?;
        if quantity == 0 {
            return Err(DomainError::validation("quantity must be positive").into());
        }
        if order.lines().len() >= self.max_items_per_order {
            return Err(DomainError::validation(format!(
                "order {order_id} already holds the maximum of {} lines",
                self.max_items_per_order
            ))
            .into());
        }

        let original_product = self.load_product(product_id)?;
        let mut product = original_product.clone();
        product.reduce_stock(quantity)?;

        let policy = pricing.unwrap_or(&self.pricing);
        let unit_price = policy.unit_charge(&original_product);
        let line = OrderLine::new(product_id, original_product.name(), quantity, unit_price)?;
        order.add_line(line)?;

        self.products.update(product)?;
        let order = match self.orders.update(order) {
            Ok(order) => order,
            Err(err) => {
                self.restore(&self.products, original_product);
                return Err(err.into());
            }
        };

        tracing::info!(
            order_id = %order_id,
            product_id = %product_id,
            quantity,
            unit_price = %money::display(unit_price),
            policy = policy.name(),
            "item added"
        );
        self.publish(OrderEventKind::ItemAdded, &order);
        Ok(order)
    }

    /// PENDING -> PROCESSING, crediting the order total to the customer.
    pub fn process_order(&self, order_id: OrderId) -> ServiceResult<Order> {
        self.try_process_order(order_id).inspect_err(|err| {
            tracing::warn!(order_id = %order_id, error = %err, "process_order rejected");
        })
    }

    fn try_process_order(&self, order_id: OrderId) -> ServiceResult<Order> {
        let mut order = self.load_order(order_id)?;
        order.process()?;

        let original_customer = self.load_customer(order.customer_id())?;
        let mut customer = original_customer.clone();
        let total = order.total();
        customer.add_purchase(total)?;
        let tier_before = original_customer.tier();
        let tier_after = customer.tier();

        self.customers.update(customer)?;
        let order = match self.orders.update(order) {
            Ok(order) => order,
            Err(err) => {
                self.restore(&self.customers, original_customer);
                return Err(err.into());
            }
        };

        tracing::info!(
            order_id = %order_id,
            customer_id = %order.customer_id(),
            total = %money::display(total),
            "order processed"
        );
        if tier_after != tier_before {
            tracing::info!(
                customer_id = %order.customer_id(),
                from = %tier_before,
                to = %tier_after,
                "customer tier changed"
            );
        }
        self.publish(OrderEventKind::Processed, &order);
        Ok(order)
    }

    /// PROCESSING -> SHIPPED.
    pub fn ship_order(&self, order_id: OrderId) -> ServiceResult<Order> {
        self.transition(order_id, OrderEventKind::Shipped, Order::ship)
    }

    /// PENDING | PROCESSING -> CANCELLED. Stock taken by `add_item` stays taken.
    pub fn cancel_order(&self, order_id: OrderId) -> ServiceResult<Order> {
        self.transition(order_id, OrderEventKind::Cancelled, Order::cancel)
    }

    pub fn get_order(&self, order_id: OrderId) -> Option<Order> {
        self.orders.get(order_id)
    }

    /// Orders of one customer, ascending by id.
    pub fn get_customer_orders(&self, customer_id: CustomerId) -> Vec<Order> {
        self.orders.find_by_customer(customer_id)
    }

    pub fn orders_by_status(&self, status: OrderStatus) -> Vec<Order> {
        self.orders.find_by_status(status)
    }

    fn transition(
        &self,
        order_id: OrderId,
        kind: OrderEventKind,
        apply: fn(&mut Order) -> Result<(), DomainError>,
    ) -> ServiceResult<Order> {
        let result = self.load_order(order_id).and_then(|mut order| {
            apply(&mut order)?;
            Ok(self.orders.update(order)?)
        });

        match result {
            Ok(order) => {
                tracing::info!(order_id = %order_id, status = %order.status(), "order status changed");
                self.publish(kind, &order);
                Ok(order)
            }
            Err(err) => {
                tracing::warn!(order_id = %order_id, ?kind, error = %err, "transition rejected");
                Err(err)
            }
        }
    }

    fn load_order(&self, id: OrderId) -> ServiceResult<Order> {
        self.orders
            .get(id)
            .ok_or_else(|| DomainError::not_found(EntityKind::Order, id).into())
    }

    fn load_product(&self, id: ProductId) -> ServiceResult<Product> {
        self.products
            .get(id)
            .ok_or_else(|| DomainError::not_found(EntityKind::Product, id).into())
    }

    fn load_customer(&self, id: CustomerId) -> ServiceResult<Customer> {
        self.customers
            .get(id)
            .ok_or_else(|| DomainError::not_found(EntityKind::Customer, id).into())
    }

    /// Put back an entity written earlier in a failed operation.
    fn restore<E, R>(&self, store: &R, snapshot: E)
    where
        E: Entity,
        R: Repository<E>,
    {
        let id = snapshot.id();
        if let Err(err) = store.update(snapshot) {
            tracing::error!(
                entity = %E::KIND,
                id = ?id,
                error = %ServiceError::from(err),
                "compensating write failed"
            );
        } else {
            tracing::warn!(entity = %E::KIND, id = ?id, "first write rolled back");
        }
    }

    fn publish(&self, kind: OrderEventKind, order: &Order) {
        let event = OrderEvent::new(kind, order.clone(), Utc::now());
        let delivered = self.notifier.notify(&event);
        tracing::debug!(
            order_id = %order.id(),
            ?kind,
            delivered,
            subscribers = self.notifier.len(),
            "order event published"
        );
    }
}

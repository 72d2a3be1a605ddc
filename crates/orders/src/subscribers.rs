//! Built-in order subscribers.
//!
//! These only log (and, for analytics, count); they stand in for the email gateway,
//! warehouse feed and reporting pipeline a deployment would plug in instead.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use orderflow_core::{Money, money};
use orderflow_events::{Event, Subscriber, SubscriberError};

use crate::event::{OrderEvent, OrderEventKind};

/// Tells the customer their order changed status.
#[derive(Debug, Default)]
pub struct EmailNotifier;

impl Subscriber<OrderEvent> for EmailNotifier {
    fn name(&self) -> &str {
        "email"
    }

    fn notify(&self, event: &OrderEvent) -> Result<(), SubscriberError> {
        let order = event.order();
        tracing::info!(
            context = event.context(),
            order_id = %event.order_id(),
            customer_id = %order.customer_id(),
            status = %order.status(),
            "email: order status changed"
        );
        Ok(())
    }
}

/// Records which lines an order touches, for warehouse reconciliation.
#[derive(Debug, Default)]
pub struct InventoryAuditor;

impl Subscriber<OrderEvent> for InventoryAuditor {
    fn name(&self) -> &str {
        "inventory"
    }

    fn notify(&self, event: &OrderEvent) -> Result<(), SubscriberError> {
        let order = event.order();
        tracing::info!(
            order_id = %event.order_id(),
            event_type = event.event_type(),
            version = event.version(),
            lines = order.lines().len(),
            units = order.lines().iter().map(|l| u64::from(l.quantity)).sum::<u64>(),
            "inventory: order lines observed"
        );
        Ok(())
    }
}

/// Counts order events and accumulates revenue of processed orders.
#[derive(Debug, Default)]
pub struct SalesAnalytics {
    events_seen: AtomicU64,
    processed_revenue: Mutex<Money>,
}

impl SalesAnalytics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events_seen(&self) -> u64 {
        self.events_seen.load(Ordering::Relaxed)
    }

    /// Sum of totals of orders at the moment they were processed.
    pub fn processed_revenue(&self) -> Money {
        match self.processed_revenue.lock() {
            Ok(revenue) => *revenue,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

impl Subscriber<OrderEvent> for SalesAnalytics {
    fn name(&self) -> &str {
        "analytics"
    }

    fn notify(&self, event: &OrderEvent) -> Result<(), SubscriberError> {
        self.events_seen.fetch_add(1, Ordering::Relaxed);

        let total = event.order().total();
        if event.kind() == OrderEventKind::Processed {
            let mut revenue = self
                .processed_revenue
                .lock()
                .map_err(|_| SubscriberError::new("analytics revenue lock poisoned"))?;
            *revenue = revenue
                .checked_add(total)
                .ok_or_else(|| SubscriberError::new("processed revenue overflow"))?;
        }

        tracing::info!(
            order_id = %event.order_id(),
            status = %event.order().status(),
            total = %money::display(total),
            "analytics: order event"
        );
        Ok(())
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use orderflow_core::{Entity, OrderId};
use orderflow_events::Event;

use crate::order::Order;

/// Which lifecycle operation produced the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderEventKind {
    Created,
    ItemAdded,
    Processed,
    Shipped,
    Cancelled,
}

/// Event: an order changed.
///
/// Carries an owned snapshot of the order as it was right after the change, so
/// subscribers cannot observe (or cause) later mutations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderEvent {
    event_id: Uuid,
    kind: OrderEventKind,
    order: Order,
    occurred_at: DateTime<Utc>,
}

impl OrderEvent {
    pub fn new(kind: OrderEventKind, order: Order, occurred_at: DateTime<Utc>) -> Self {
        Self {
            event_id: Uuid::now_v7(),
            kind,
            order,
            occurred_at,
        }
    }

    pub fn event_id(&self) -> Uuid {
        self.event_id
    }

    pub fn kind(&self) -> OrderEventKind {
        self.kind
    }

    pub fn order(&self) -> &Order {
        &self.order
    }

    pub fn order_id(&self) -> OrderId {
        self.order.id()
    }
}

impl Event for OrderEvent {
    fn event_type(&self) -> &'static str {
        match self.kind {
            OrderEventKind::Created => "orders.order.created",
            OrderEventKind::ItemAdded => "orders.order.item_added",
            OrderEventKind::Processed => "orders.order.processed",
            OrderEventKind::Shipped => "orders.order.shipped",
            OrderEventKind::Cancelled => "orders.order.cancelled",
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}

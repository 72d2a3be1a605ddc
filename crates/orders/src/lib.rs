//! Orders domain module.
//!
//! This crate contains the order state machine, pricing policies and the order
//! events published on every lifecycle change. Pure domain logic: no IO, no storage.

pub mod event;
pub mod order;
pub mod pricing;
pub mod subscribers;

pub use event::{OrderEvent, OrderEventKind};
pub use order::{Order, OrderLine, OrderStatus};
pub use pricing::PricingPolicy;
pub use subscribers::{EmailNotifier, InventoryAuditor, SalesAnalytics};

//! Domain error model.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result of a domain operation.
pub type DomainResult<T> = Result<T, DomainError>;

/// Kind of entity a lookup was made for.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Product,
    Customer,
    Order,
}

impl core::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            EntityKind::Product => "product",
            EntityKind::Customer => "customer",
            EntityKind::Order => "order",
        };
        f.write_str(name)
    }
}

/// Domain-level error.
///
/// Business-rule failures only: lookups, lifecycle guards, stock and input checks.
/// Storage failures live in the infra crate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A referenced entity does not exist.
    #[error("{entity} {id} not found")]
    NotFound { entity: EntityKind, id: u64 },

    /// The order is not in a status that allows the requested operation.
    #[error("invalid transition: {0}")]
    InvalidTransition(String),

    /// Not enough stock to satisfy the requested quantity.
    #[error("insufficient stock for product {product_id}: available {available}, requested {requested}")]
    InsufficientStock {
        product_id: u64,
        available: u32,
        requested: u32,
    },

    /// Processing was requested for an order without lines.
    #[error("cannot process empty order")]
    EmptyOrder,

    /// A discount percentage fell outside `[0, 100]`.
    #[error("invalid discount percentage: {0}")]
    InvalidDiscount(String),

    /// Another customer already uses this contact identifier.
    #[error("customer with contact {0} already exists")]
    DuplicateContact(String),

    /// Input rejected before any state changed.
    #[error("validation failed: {0}")]
    Validation(String),

    /// An id string could not be parsed.
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn not_found(entity: EntityKind, id: impl Into<u64>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn invalid_transition(msg: impl Into<String>) -> Self {
        Self::InvalidTransition(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn invalid_discount(msg: impl Into<String>) -> Self {
        Self::InvalidDiscount(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_entity_and_id() {
        let err = DomainError::not_found(EntityKind::Order, 42u64);
        assert_eq!(err.to_string(), "order 42 not found");
    }

    #[test]
    fn insufficient_stock_message_carries_quantities() {
        let err = DomainError::InsufficientStock {
            product_id: 3,
            available: 5,
            requested: 6,
        };
        assert!(err.to_string().contains("available 5, requested 6"));
    }
}

use thiserror::Error;

use orderflow_core::EntityKind;

/// Storage-level failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// `update` was called for an id the store does not hold.
    #[error("{entity} {id} not found in store")]
    NotFound { entity: EntityKind, id: u64 },

    /// `insert` was called with an id the store already holds.
    #[error("{entity} {id} already exists in store")]
    Duplicate { entity: EntityKind, id: u64 },

    /// A previous writer panicked while holding the store lock.
    #[error("store lock poisoned")]
    Poisoned,
}

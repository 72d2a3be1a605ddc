//! Infrastructure layer: keyed storage for products, customers and orders.

pub mod error;
pub mod repository;

pub use error::StoreError;
pub use repository::{
    CustomerRepository, InMemoryRepository, OrderRepository, ProductRepository, Repository,
};

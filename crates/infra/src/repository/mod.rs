//! Keyed storage abstractions.
//!
//! Every store offers the same five operations (insert with id assignment, get, list,
//! update, delete); the per-entity sub-traits add the lookups the services need.

pub mod in_memory;

pub use in_memory::InMemoryRepository;

use std::sync::Arc;

use orderflow_catalog::Product;
use orderflow_core::{CustomerId, Entity};
use orderflow_customers::Customer;
use orderflow_orders::{Order, OrderStatus};

use crate::error::StoreError;

/// Keyed store for one entity type.
pub trait Repository<E: Entity>: Send + Sync {
    /// Store a new entity. An unassigned id is replaced by the next free one; an id
    /// already in the store is rejected.
    fn insert(&self, entity: E) -> Result<E, StoreError>;

    fn get(&self, id: E::Id) -> Option<E>;

    /// All entities, ascending by id.
    fn list(&self) -> Vec<E>;

    /// Replace an existing entity. Fails when the id is not present.
    fn update(&self, entity: E) -> Result<E, StoreError>;

    /// Returns whether anything was deleted.
    fn delete(&self, id: E::Id) -> bool;
}

pub trait ProductRepository: Repository<Product> {
    fn find_by_category(&self, category: &str) -> Vec<Product>;

    /// Products with stock left.
    fn find_available(&self) -> Vec<Product>;
}

pub trait CustomerRepository: Repository<Customer> {
    fn find_by_email(&self, email: &str) -> Option<Customer>;
}

pub trait OrderRepository: Repository<Order> {
    fn find_by_customer(&self, customer_id: CustomerId) -> Vec<Order>;

    fn find_by_status(&self, status: OrderStatus) -> Vec<Order>;
}

impl<E, S> Repository<E> for Arc<S>
where
    E: Entity,
    S: Repository<E> + ?Sized,
{
    fn insert(&self, entity: E) -> Result<E, StoreError> {
        (**self).insert(entity)
    }

    fn get(&self, id: E::Id) -> Option<E> {
        (**self).get(id)
    }

    fn list(&self) -> Vec<E> {
        (**self).list()
    }

    fn update(&self, entity: E) -> Result<E, StoreError> {
        (**self).update(entity)
    }

    fn delete(&self, id: E::Id) -> bool {
        (**self).delete(id)
    }
}

impl<S> ProductRepository for Arc<S>
where
    S: ProductRepository + ?Sized,
{
    fn find_by_category(&self, category: &str) -> Vec<Product> {
        (**self).find_by_category(category)
    }

    fn find_available(&self) -> Vec<Product> {
        (**self).find_available()
    }
}

impl<S> CustomerRepository for Arc<S>
where
    S: CustomerRepository + ?Sized,
{
    fn find_by_email(&self, email: &str) -> Option<Customer> {
        (**self).find_by_email(email)
    }
}

impl<S> OrderRepository for Arc<S>
where
    S: OrderRepository + ?Sized,
{
    fn find_by_customer(&self, customer_id: CustomerId) -> Vec<Order> {
        (**self).find_by_customer(customer_id)
    }

    fn find_by_status(&self, status: OrderStatus) -> Vec<Order> {
        (**self).find_by_status(status)
    }
}

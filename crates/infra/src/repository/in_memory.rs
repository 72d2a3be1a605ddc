use std::collections::BTreeMap;
use std::sync::RwLock;

use orderflow_catalog::Product;
use orderflow_core::{CustomerId, Entity};
use orderflow_customers::Customer;
use orderflow_orders::{Order, OrderStatus};

use crate::error::StoreError;
use crate::repository::{CustomerRepository, OrderRepository, ProductRepository, Repository};

#[derive(Debug)]
struct Inner<E> {
    entities: BTreeMap<u64, E>,
    next_id: u64,
}

/// In-memory store with auto-increment ids, for tests/dev and the single-process app.
///
/// Ids start at 1 and are never reused, even after a delete. Inserting onto an id
/// that is already taken fails instead of overwriting.
#[derive(Debug)]
pub struct InMemoryRepository<E> {
    inner: RwLock<Inner<E>>,
}

impl<E> InMemoryRepository<E> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                entities: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|i| i.entities.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<E: Clone> InMemoryRepository<E> {
    fn find_where(&self, predicate: impl Fn(&E) -> bool) -> Vec<E> {
        let inner = match self.inner.read() {
            Ok(i) => i,
            Err(_) => return vec![],
        };

        inner
            .entities
            .values()
            .filter(|e| predicate(e))
            .cloned()
            .collect()
    }
}

impl<E> Default for InMemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Repository<E> for InMemoryRepository<E>
where
    E: Entity + Clone + Send + Sync + 'static,
{
    fn insert(&self, mut entity: E) -> Result<E, StoreError> {
        let mut inner = self.inner.write().map_err(|_| StoreError::Poisoned)?;

        let raw: u64 = entity.id().into();
        let id = if raw == 0 {
            let id = inner.next_id;
            entity.assign_id(<E::Id as From<u64>>::from(id));
            id
        } else {
            raw
        };
        if inner.entities.contains_key(&id) {
            return Err(StoreError::Duplicate {
                entity: E::KIND,
                id,
            });
        }
        inner.next_id = inner.next_id.max(id.saturating_add(1));
        inner.entities.insert(id, entity.clone());

        tracing::debug!(entity = %E::KIND, id, "inserted");
        Ok(entity)
    }

    fn get(&self, id: E::Id) -> Option<E> {
        let key: u64 = id.into();
        let inner = self.inner.read().ok()?;
        inner.entities.get(&key).cloned()
    }

    fn list(&self) -> Vec<E> {
        self.find_where(|_| true)
    }

    fn update(&self, entity: E) -> Result<E, StoreError> {
        let mut inner = self.inner.write().map_err(|_| StoreError::Poisoned)?;

        let id: u64 = entity.id().into();
        match inner.entities.get_mut(&id) {
            Some(slot) => {
                *slot = entity.clone();
                tracing::debug!(entity = %E::KIND, id, "updated");
                Ok(entity)
            }
            None => Err(StoreError::NotFound {
                entity: E::KIND,
                id,
            }),
        }
    }

    fn delete(&self, id: E::Id) -> bool {
        let key: u64 = id.into();
        match self.inner.write() {
            Ok(mut inner) => inner.entities.remove(&key).is_some(),
            Err(_) => false,
        }
    }
}

impl ProductRepository for InMemoryRepository<Product> {
    fn find_by_category(&self, category: &str) -> Vec<Product> {
        self.find_where(|p| p.category() == category)
    }

    fn find_available(&self) -> Vec<Product> {
        self.find_where(Product::is_available)
    }
}

impl CustomerRepository for InMemoryRepository<Customer> {
    fn find_by_email(&self, email: &str) -> Option<Customer> {
        self.find_where(|c| c.email() == email).into_iter().next()
    }
}

impl OrderRepository for InMemoryRepository<Order> {
    fn find_by_customer(&self, customer_id: CustomerId) -> Vec<Order> {
        self.find_where(|o| o.customer_id() == customer_id)
    }

    fn find_by_status(&self, status: OrderStatus) -> Vec<Order> {
        self.find_where(|o| o.status() == status)
    }
}

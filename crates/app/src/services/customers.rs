use orderflow_core::{CustomerId, DomainError, Entity, EntityKind};
use orderflow_customers::Customer;
use orderflow_infra::CustomerRepository;

use crate::error::ServiceResult;

/// Customer registration and lookups. Emails are unique across customers.
pub struct CustomerService<C> {
    customers: C,
}

impl<C: CustomerRepository> CustomerService<C> {
    pub fn new(customers: C) -> Self {
        Self { customers }
    }

    pub fn create_customer(
        &self,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> ServiceResult<Customer> {
        let customer = Customer::new(name, email)?;
        self.ensure_email_free(customer.email(), None)?;

        let customer = self.customers.insert(customer)?;
        tracing::info!(customer_id = %customer.id(), "customer registered");
        Ok(customer)
    }

    pub fn get_customer(&self, id: CustomerId) -> Option<Customer> {
        self.customers.get(id)
    }

    pub fn customer_by_email(&self, email: &str) -> Option<Customer> {
        self.customers.find_by_email(email)
    }

    pub fn list_customers(&self) -> Vec<Customer> {
        self.customers.list()
    }

    /// Replace a stored customer. The email must stay unique.
    pub fn update_customer(&self, customer: Customer) -> ServiceResult<Customer> {
        self.ensure_email_free(customer.email(), Some(customer.id()))?;
        Ok(self.customers.update(customer)?)
    }

    pub fn delete_customer(&self, id: CustomerId) -> ServiceResult<()> {
        if !self.customers.delete(id) {
            return Err(DomainError::not_found(EntityKind::Customer, id).into());
        }
        tracing::info!(customer_id = %id, "customer deleted");
        Ok(())
    }

    fn ensure_email_free(&self, email: &str, owner: Option<CustomerId>) -> ServiceResult<()> {
        match self.customers.find_by_email(email) {
            Some(existing) if Some(existing.id()) != owner => {
                Err(DomainError::DuplicateContact(email.to_string()).into())
            }
            _ => Ok(()),
        }
    }
}

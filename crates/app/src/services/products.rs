use orderflow_catalog::{CategoryRegistry, NewProduct, Product};
use orderflow_core::{DomainError, Entity, EntityKind, ProductId};
use orderflow_infra::ProductRepository;

use crate::error::ServiceResult;

/// Product creation and stock administration.
///
/// Categories with a registered template get the template's description; any other
/// category is stored as given.
pub struct ProductService<P> {
    products: P,
    registry: CategoryRegistry,
}

impl<P: ProductRepository> ProductService<P> {
    pub fn new(products: P, registry: CategoryRegistry) -> Self {
        Self { products, registry }
    }

    pub fn registry(&self) -> &CategoryRegistry {
        &self.registry
    }

    pub fn create_product(&self, input: NewProduct) -> ServiceResult<Product> {
        let product = match self.registry.template(&input.category) {
            Some(template) => template.build(&input.name, input.price, input.stock)?,
            None => Product::new(input)?,
        };

        let product = self.products.insert(product)?;
        tracing::info!(
            product_id = %product.id(),
            category = product.category(),
            stock = product.stock(),
            "product created"
        );
        Ok(product)
    }

    pub fn get_product(&self, id: ProductId) -> Option<Product> {
        self.products.get(id)
    }

    pub fn list_products(&self) -> Vec<Product> {
        self.products.list()
    }

    pub fn available_products(&self) -> Vec<Product> {
        self.products.find_available()
    }

    pub fn products_by_category(&self, category: &str) -> Vec<Product> {
        self.products.find_by_category(category)
    }

    /// Set the stock level outright (restock or correction).
    pub fn update_stock(&self, id: ProductId, stock: u32) -> ServiceResult<Product> {
        let mut product = self
            .products
            .get(id)
            .ok_or_else(|| DomainError::not_found(EntityKind::Product, id))?;
        let previous = product.stock();
        product.set_stock(stock);

        let product = self.products.update(product)?;
        tracing::info!(product_id = %id, previous, stock, "stock updated");
        Ok(product)
    }

    pub fn delete_product(&self, id: ProductId) -> ServiceResult<()> {
        if !self.products.delete(id) {
            return Err(DomainError::not_found(EntityKind::Product, id).into());
        }
        tracing::info!(product_id = %id, "product deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use orderflow_core::Money;
    use orderflow_infra::InMemoryRepository;
    use rust_decimal_macros::dec;

    use crate::error::ServiceError;

    fn test_service() -> ProductService<Arc<InMemoryRepository<Product>>> {
        ProductService::new(
            Arc::new(InMemoryRepository::new()),
            CategoryRegistry::with_defaults(),
        )
    }

    fn test_input(name: &str, category: &str, price: Money, stock: u32) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            price,
            category: category.to_string(),
            stock,
            description: Some("custom".to_string()),
        }
    }

    #[test]
    fn registered_category_uses_template_description() {
        let service = test_service();
        let product = service
            .create_product(test_input("Laptop", "ELECTRONICS", dec!(999), 3))
            .unwrap();
        assert_eq!(product.description(), Some("Electronics product: Laptop"));
    }

    #[test]
    fn unknown_category_keeps_given_description() {
        let service = test_service();
        let product = service
            .create_product(test_input("Mug", "KITCHEN", dec!(8), 3))
            .unwrap();
        assert_eq!(product.description(), Some("custom"));
        assert_eq!(service.products_by_category("KITCHEN").len(), 1);
    }

    #[test]
    fn negative_price_is_rejected() {
        let service = test_service();
        let err = service
            .create_product(test_input("Bad", "BOOKS", dec!(-1), 1))
            .unwrap_err();
        assert!(matches!(err, ServiceError::Domain(DomainError::Validation(_))));
        assert!(service.list_products().is_empty());
    }

    #[test]
    fn update_stock_sets_level_and_availability() {
        let service = test_service();
        let product = service
            .create_product(test_input("Shirt", "CLOTHING", dec!(20), 0))
            .unwrap();
        assert!(service.available_products().is_empty());

        let product = service.update_stock(product.id(), 4).unwrap();
        assert_eq!(product.stock(), 4);
        assert_eq!(service.available_products().len(), 1);
    }

    #[test]
    fn update_stock_for_unknown_product_fails() {
        let service = test_service();
        let err = service.update_stock(ProductId::new(8), 1).unwrap_err();
        assert_eq!(
            err.as_domain(),
            Some(&DomainError::not_found(EntityKind::Product, 8u64))
        );
    }

    #[test]
    fn delete_product_removes_it() {
        let service = test_service();
        let product = service
            .create_product(test_input("Dune", "BOOKS", dec!(12), 2))
            .unwrap();
        service.delete_product(product.id()).unwrap();
        assert!(service.get_product(product.id()).is_none());
        assert!(service.delete_product(product.id()).is_err());
    }
}

//! Category templates for building products.
//!
//! The registry is an ordinary value: the composition root builds one (usually with
//! [`CategoryRegistry::with_defaults`]) and hands it to whoever creates products.

use std::collections::BTreeMap;

use orderflow_core::{DomainError, DomainResult, Money};

use crate::product::{NewProduct, Product};

/// How products of one category are built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductTemplate {
    category: String,
    /// Prepended to the product name to form its description.
    description_prefix: String,
}

impl ProductTemplate {
    pub fn new(category: impl Into<String>, description_prefix: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            description_prefix: description_prefix.into(),
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn build(&self, name: &str, price: Money, stock: u32) -> DomainResult<Product> {
        Product::new(NewProduct {
            name: name.to_string(),
            price,
            category: self.category.clone(),
            stock,
            description: Some(format!("{}: {}", self.description_prefix, name)),
        })
    }
}

/// Category tag -> template.
#[derive(Debug, Clone, Default)]
pub struct CategoryRegistry {
    templates: BTreeMap<String, ProductTemplate>,
}

impl CategoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the ELECTRONICS, CLOTHING and BOOKS templates.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(ProductTemplate::new("ELECTRONICS", "Electronics product"));
        registry.register(ProductTemplate::new("CLOTHING", "Clothing product"));
        registry.register(ProductTemplate::new("BOOKS", "Book"));
        registry
    }

    /// Add or replace the template for its category.
    pub fn register(&mut self, template: ProductTemplate) {
        self.templates.insert(template.category.clone(), template);
    }

    pub fn template(&self, category: &str) -> Option<&ProductTemplate> {
        self.templates.get(category)
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    /// Build a product from the category's template.
    pub fn create(&self, category: &str, name: &str, price: Money, stock: u32) -> DomainResult<Product> {
        let template = self.template(category).ok_or_else(|| {
            DomainError::validation(format!("no template registered for category: {category}"))
        })?;
        template.build(name, price, stock)
    }
}

use serde::{Deserialize, Serialize};

use orderflow_core::{DomainError, DomainResult, Entity, EntityKind, Money, Percentage, ProductId};

/// Input for creating a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub price: Money,
    /// Free-form category tag (e.g. "ELECTRONICS").
    pub category: String,
    pub stock: u32,
    pub description: Option<String>,
}

/// Entity: Product.
///
/// Stock only moves through [`Product::reduce_stock`] (when an order line is added)
/// and [`Product::set_stock`] (explicit restock).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    price: Money,
    category: String,
    stock: u32,
    description: Option<String>,
}

impl Product {
    /// Build a product that has not been stored yet (unassigned id).
    pub fn new(input: NewProduct) -> DomainResult<Self> {
        if input.name.trim().is_empty() {
            return Err(DomainError::validation("product name cannot be empty"));
        }
        if input.price < Money::ZERO {
            return Err(DomainError::validation("price cannot be negative"));
        }

        Ok(Self {
            id: ProductId::UNASSIGNED,
            name: input.name,
            price: input.price,
            category: input.category,
            stock: input.stock,
            description: input.description,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// List price per unit.
    pub fn price(&self) -> Money {
        self.price
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn stock(&self) -> u32 {
        self.stock
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn is_available(&self) -> bool {
        self.stock > 0
    }

    pub fn can_purchase(&self, quantity: u32) -> bool {
        self.stock >= quantity
    }

    /// Take `quantity` units out of stock.
    ///
    /// Fails without touching the stock when not enough units are available.
    pub fn reduce_stock(&mut self, quantity: u32) -> DomainResult<()> {
        if !self.can_purchase(quantity) {
            return Err(DomainError::InsufficientStock {
                product_id: self.id.get(),
                available: self.stock,
                requested: quantity,
            });
        }
        self.stock -= quantity;
        Ok(())
    }

    pub fn set_stock(&mut self, stock: u32) {
        self.stock = stock;
    }

    /// List price reduced by `discount`.
    pub fn apply_discount(&self, discount: Percentage) -> Money {
        discount.apply_to(self.price)
    }
}

impl Entity for Product {
    type Id = ProductId;

    const KIND: EntityKind = EntityKind::Product;

    fn id(&self) -> ProductId {
        self.id
    }

    fn assign_id(&mut self, id: ProductId) {
        self.id = id;
    }
}

//! Catalog domain module.
//!
//! This crate contains business rules for products and their stock, implemented
//! purely as deterministic domain logic (no IO, no storage).

pub mod product;
pub mod registry;

pub use product::{NewProduct, Product};
pub use registry::{CategoryRegistry, ProductTemplate};

//! Customers domain module.
//!
//! This crate contains business rules for customers and their membership tier,
//! implemented purely as deterministic domain logic (no IO, no storage).

pub mod customer;

pub use customer::{Customer, Tier};

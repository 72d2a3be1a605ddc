//! Application services over the entity stores.

pub mod customers;
pub mod orders;
pub mod products;

pub use customers::CustomerService;
pub use orders::OrderService;
pub use products::ProductService;

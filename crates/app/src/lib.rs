//! Order orchestration application: configuration, services and composition root.

pub mod app;
pub mod config;
pub mod error;
pub mod services;

pub use app::App;
pub use config::AppConfig;
pub use error::{ServiceError, ServiceResult};
pub use services::{CustomerService, OrderService, ProductService};

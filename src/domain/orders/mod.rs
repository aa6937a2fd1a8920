//! Orders

pub mod errors;
pub mod lifecycle;
pub mod models;
pub(crate) mod records;
pub(crate) mod repository;
pub mod service;

pub use errors::OrdersServiceError;
pub use lifecycle::OrderStatus;
pub use service::*;

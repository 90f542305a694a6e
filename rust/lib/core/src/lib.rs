pub mod config;
pub mod error;

pub use config::{RunMode, ServiceConfig, StoreLocation};
pub use error::ServiceError;

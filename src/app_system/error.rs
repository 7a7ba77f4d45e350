use crate::analytics::AnalyticsError;
use crate::config::ConfigError;
use crate::customer_actor::CustomerError;
use crate::order_actor::OrderError;
use crate::product_actor::ProductError;
use crate::vendor_actor::VendorError;
use thiserror::Error;

/// Top-level error for whole-system operations such as seeding and shutdown.
#[derive(Debug, Error)]
pub enum SystemError {
    #[error(transparent)]
    Customer(#[from] CustomerError),
    #[error(transparent)]
    Vendor(#[from] VendorError),
    #[error(transparent)]
    Product(#[from] ProductError),
    #[error(transparent)]
    Order(#[from] OrderError),
    #[error(transparent)]
    Analytics(#[from] AnalyticsError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Actor task failed: {0}")]
    ActorTask(String),
}

use super::period::Window;
use crate::domain::{Customer, Order, OrderLineItem, Product, Vendor};
use async_trait::async_trait;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Whose numbers a rollup covers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    /// The whole marketplace, as seen from the admin dashboard.
    Platform,
    /// A single vendor's slice, as seen from that vendor's dashboard.
    Vendor(String),
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Platform => f.write_str("platform"),
            Scope::Vendor(id) => write!(f, "vendor:{}", id),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProviderError {
    #[error("{resource} query failed: {reason}")]
    Query { resource: &'static str, reason: String },
    #[error("data fetch timed out after {0:?}")]
    Timeout(Duration),
}

/// Read access to the storage layer the rollups are computed from.
///
/// In vendor scope an order is projected onto that vendor: `total` is the
/// vendor's line-item subtotal, and orders holding none of the vendor's items
/// are left out. Line items are windowed by their parent order's `created_at`.
#[async_trait]
pub trait DataProvider: Send + Sync {
    async fn list_orders(&self, scope: &Scope, window: &Window) -> Result<Vec<Order>, ProviderError>;

    async fn list_order_line_items(
        &self,
        scope: &Scope,
        window: &Window,
    ) -> Result<Vec<OrderLineItem>, ProviderError>;

    async fn list_products(&self, scope: &Scope) -> Result<Vec<Product>, ProviderError>;

    async fn list_vendors(&self, scope: &Scope) -> Result<Vec<Vendor>, ProviderError>;

    async fn list_customers(&self) -> Result<Vec<Customer>, ProviderError>;

    /// The `limit` most recently created orders, regardless of any window.
    async fn list_recent_orders(&self, scope: &Scope, limit: usize) -> Result<Vec<Order>, ProviderError>;

    async fn list_line_items_for_orders(
        &self,
        scope: &Scope,
        order_ids: &[String],
    ) -> Result<Vec<OrderLineItem>, ProviderError>;
}

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    Draft,
    Active,
    Inactive,
    Archived,
}

/// A product listed by a vendor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub vendor_id: String,
    pub name: String,
    pub price: Decimal,
    pub inventory: u32,
    pub status: ProductStatus,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a listing.
#[derive(Debug, Clone)]
pub struct ProductCreate {
    pub vendor_id: String,
    pub name: String,
    pub price: Decimal,
    pub inventory: u32,
    pub status: ProductStatus,
    pub created_at: DateTime<Utc>,
}

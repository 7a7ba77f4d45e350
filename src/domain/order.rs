use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Payment state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
    Refunded,
}

/// Fulfilment state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Delivered and cancelled orders accept no further lifecycle changes.
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }
}

/// Represents a customer order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub order_number: String,
    pub customer_id: String,
    pub total: Decimal,
    pub payment_status: PaymentStatus,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a new order.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub order_number: String,
    pub customer_id: String,
    pub total: Decimal,
    pub created_at: DateTime<Utc>,
}

/// What a customer asks for at checkout, before prices are resolved.
#[derive(Debug, Clone)]
pub struct OrderDraft {
    pub customer_id: String,
    pub items: Vec<DraftItem>,
    pub placed_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct DraftItem {
    pub product_id: String,
    pub quantity: u32,
}

impl OrderDraft {
    pub fn new(customer_id: impl Into<String>, placed_at: DateTime<Utc>) -> Self {
        Self {
            customer_id: customer_id.into(),
            items: Vec::new(),
            placed_at,
        }
    }

    pub fn item(mut self, product_id: impl Into<String>, quantity: u32) -> Self {
        self.items.push(DraftItem {
            product_id: product_id.into(),
            quantity,
        });
        self
    }
}

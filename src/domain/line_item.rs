use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One product-quantity entry within an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLineItem {
    pub id: String,
    pub order_id: String,
    pub product_id: String,
    pub vendor_id: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub total: Decimal,
}

impl OrderLineItem {
    pub fn expected_total(&self) -> Decimal {
        Decimal::from(self.quantity) * self.unit_price
    }

    /// True when the stored total equals `quantity * unit_price` exactly.
    pub fn is_consistent(&self) -> bool {
        self.total == self.expected_total()
    }
}

/// Payload for a line item. The stored total is always derived.
#[derive(Debug, Clone)]
pub struct OrderLineItemCreate {
    pub order_id: String,
    pub product_id: String,
    pub vendor_id: String,
    pub quantity: u32,
    pub unit_price: Decimal,
}

use super::actions::{ProductAction, ProductActionResult};
use crate::actor_framework::Entity;
use crate::domain::{Product, ProductCreate};
use rust_decimal::Decimal;

impl Entity for Product {
    type Id = String;
    type CreatePayload = ProductCreate;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;

    const KIND: &'static str = "product";

    fn id(&self) -> &String {
        &self.id
    }

    /// Creates a new Product from creation parameters.
    ///
    /// # Errors
    /// Negative prices are rejected.
    fn from_create(id: String, payload: ProductCreate) -> Result<Self, String> {
        if payload.price < Decimal::ZERO {
            return Err(format!("Invalid price: {}", payload.price));
        }
        Ok(Self {
            id,
            vendor_id: payload.vendor_id,
            name: payload.name,
            price: payload.price,
            inventory: payload.inventory,
            status: payload.status,
            created_at: payload.created_at,
        })
    }

    /// Handles product-specific actions.
    ///
    /// Every result carries the stock level after the action.
    fn handle_action(&mut self, action: ProductAction) -> Result<ProductActionResult, String> {
        match action {
            ProductAction::CheckStock => Ok(ProductActionResult::CheckStock(self.inventory)),
            ProductAction::ReserveStock(amount) => {
                if self.inventory >= amount {
                    self.inventory -= amount;
                    Ok(ProductActionResult::ReserveStock(self.inventory))
                } else {
                    Err(format!(
                        "Insufficient stock: {} available, {} requested",
                        self.inventory, amount
                    ))
                }
            }
            ProductAction::ReleaseStock(amount) => {
                self.inventory = self.inventory.saturating_add(amount);
                Ok(ProductActionResult::ReleaseStock(self.inventory))
            }
        }
    }
}

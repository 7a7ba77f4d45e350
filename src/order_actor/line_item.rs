use crate::actor_framework::Entity;
use crate::domain::{OrderLineItem, OrderLineItemCreate};
use rust_decimal::Decimal;

impl Entity for OrderLineItem {
    type Id = String;
    type CreatePayload = OrderLineItemCreate;
    type Action = ();
    type ActionResult = ();

    const KIND: &'static str = "line_item";

    fn id(&self) -> &String {
        &self.id
    }

    /// The stored total is derived here, so items written through the actor
    /// always satisfy `total == quantity * unit_price`.
    fn from_create(id: String, payload: OrderLineItemCreate) -> Result<Self, String> {
        if payload.quantity == 0 {
            return Err("Quantity must be positive".to_string());
        }
        if payload.unit_price < Decimal::ZERO {
            return Err(format!("Invalid unit price: {}", payload.unit_price));
        }
        let total = Decimal::from(payload.quantity) * payload.unit_price;
        Ok(Self {
            id,
            order_id: payload.order_id,
            product_id: payload.product_id,
            vendor_id: payload.vendor_id,
            quantity: payload.quantity,
            unit_price: payload.unit_price,
            total,
        })
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), String> {
        Ok(())
    }
}

use super::actions::OrderAction;
use crate::actor_framework::Entity;
use crate::domain::{Order, OrderCreate, OrderStatus, PaymentStatus};
use rust_decimal::Decimal;

impl Entity for Order {
    type Id = String;
    type CreatePayload = OrderCreate;
    type Action = OrderAction;
    /// The order as it stands after the transition.
    type ActionResult = Order;

    const KIND: &'static str = "order";

    fn id(&self) -> &String {
        &self.id
    }

    /// Creates a new Order from creation parameters.
    ///
    /// # Notes
    /// The order starts with payment and fulfilment both pending.
    fn from_create(id: String, payload: OrderCreate) -> Result<Self, String> {
        Ok(Self {
            id,
            order_number: payload.order_number,
            customer_id: payload.customer_id,
            total: payload.total,
            payment_status: PaymentStatus::Pending,
            status: OrderStatus::Pending,
            created_at: payload.created_at,
        })
    }

    fn on_create(&mut self) -> Result<(), String> {
        if self.total < Decimal::ZERO {
            return Err(format!("Invalid order total: {}", self.total));
        }
        Ok(())
    }

    /// Payment may move pending -> paid|failed and paid -> refunded.
    /// Fulfilment may change freely until the order is delivered or cancelled.
    fn handle_action(&mut self, action: OrderAction) -> Result<Order, String> {
        match action {
            OrderAction::RecordPayment(next) => {
                let allowed = matches!(
                    (self.payment_status, next),
                    (PaymentStatus::Pending, PaymentStatus::Paid)
                        | (PaymentStatus::Pending, PaymentStatus::Failed)
                        | (PaymentStatus::Paid, PaymentStatus::Refunded)
                );
                if !allowed {
                    return Err(format!(
                        "Payment cannot move from {:?} to {:?}",
                        self.payment_status, next
                    ));
                }
                self.payment_status = next;
            }
            OrderAction::UpdateStatus(next) => {
                if self.status.is_terminal() {
                    return Err(format!("Order is already {:?}", self.status));
                }
                self.status = next;
            }
        }
        Ok(self.clone())
    }
}

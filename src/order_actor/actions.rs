use crate::domain::{OrderStatus, PaymentStatus};

/// State transitions recorded against an existing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderAction {
    /// Outcome reported by the payment processor.
    RecordPayment(PaymentStatus),
    /// Fulfilment progress reported by the vendor.
    UpdateStatus(OrderStatus),
}

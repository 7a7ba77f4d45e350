use super::period::Window;
use crate::domain::{Order, PaymentStatus};
use rust_decimal::Decimal;
use serde::Serialize;

/// Sum, count and mean of order totals inside one window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct MetricSummary {
    pub total: Decimal,
    pub count: u64,
    pub average: Decimal,
}

/// Aggregates the orders created inside `window`, optionally restricted to a
/// payment status. An empty selection yields all zeroes.
pub fn aggregate<'a, I>(orders: I, window: &Window, payment_filter: Option<PaymentStatus>) -> MetricSummary
where
    I: IntoIterator<Item = &'a Order>,
{
    let (total, count) = orders
        .into_iter()
        .filter(|order| window.contains(order.created_at))
        .filter(|order| payment_filter.map_or(true, |status| order.payment_status == status))
        .fold((Decimal::ZERO, 0u64), |(total, count), order| (total + order.total, count + 1));

    let average = if count > 0 {
        total / Decimal::from(count)
    } else {
        Decimal::ZERO
    };

    MetricSummary { total, count, average }
}

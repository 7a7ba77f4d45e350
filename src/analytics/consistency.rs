use super::error::AnalyticsError;
use super::overview::Snapshot;
use crate::domain::{Order, OrderLineItem};
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};
use tracing::warn;

/// Orders and line items that passed reconciliation, plus one
/// [`AnalyticsError::InconsistentData`] per excluded order.
#[derive(Debug, Clone, Default)]
pub struct Reconciled {
    pub orders: Vec<Order>,
    pub line_items: Vec<OrderLineItem>,
    pub excluded: Vec<AnalyticsError>,
}

/// Checks every windowed order against its line items and the reference data.
///
/// An order is excluded when its customer is unknown, when one of its line
/// items has zero quantity, has `total != quantity * unit_price` or points at
/// an unknown product or vendor, or when its line items do not add up to its
/// total within `tolerance`. Line items without a parent order are excluded as well.
pub fn reconcile(snapshot: &Snapshot, tolerance: Decimal) -> Reconciled {
    let customers: HashSet<&str> = snapshot.customers.iter().map(|c| c.id.as_str()).collect();
    let products: HashSet<&str> = snapshot.products.iter().map(|p| p.id.as_str()).collect();
    let vendors: HashSet<&str> = snapshot.vendors.iter().map(|v| v.id.as_str()).collect();
    let order_ids: HashSet<&str> = snapshot.orders.iter().map(|o| o.id.as_str()).collect();

    let mut items_by_order: HashMap<&str, Vec<&OrderLineItem>> = HashMap::new();
    let mut reconciled = Reconciled::default();

    for item in &snapshot.line_items {
        if order_ids.contains(item.order_id.as_str()) {
            items_by_order.entry(item.order_id.as_str()).or_default().push(item);
        } else {
            reconciled.excluded.push(exclude(&item.order_id, format!("line item {} has no matching order", item.id)));
        }
    }

    for order in &snapshot.orders {
        let items = items_by_order.remove(order.id.as_str()).unwrap_or_default();

        let problem = if !customers.contains(order.customer_id.as_str()) {
            Some(format!("unknown customer {}", order.customer_id))
        } else {
            items.iter().find_map(|item| check_item(item, &products, &vendors))
        };

        let problem = problem.or_else(|| {
            let line_sum: Decimal = items.iter().map(|item| item.total).sum();
            ((line_sum - order.total).abs() > tolerance)
                .then(|| format!("line items sum to {} but order total is {}", line_sum, order.total))
        });

        match problem {
            Some(reason) => reconciled.excluded.push(exclude(&order.id, reason)),
            None => {
                reconciled.orders.push(order.clone());
                reconciled.line_items.extend(items.into_iter().cloned());
            }
        }
    }

    reconciled
}

fn check_item(item: &OrderLineItem, products: &HashSet<&str>, vendors: &HashSet<&str>) -> Option<String> {
    if item.quantity == 0 {
        Some(format!("line item {} has zero quantity", item.id))
    } else if !item.is_consistent() {
        Some(format!(
            "line item {} total {} != {} x {}",
            item.id, item.total, item.quantity, item.unit_price
        ))
    } else if !products.contains(item.product_id.as_str()) {
        Some(format!("line item {} references unknown product {}", item.id, item.product_id))
    } else if !vendors.contains(item.vendor_id.as_str()) {
        Some(format!("line item {} references unknown vendor {}", item.id, item.vendor_id))
    } else {
        None
    }
}

fn exclude(order_id: &str, reason: String) -> AnalyticsError {
    warn!(order_id = %order_id, reason = %reason, "Excluding inconsistent order from rollup");
    AnalyticsError::InconsistentData {
        order_id: order_id.to_string(),
        reason,
    }
}

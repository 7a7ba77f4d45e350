use crate::domain::OrderLineItem;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// Size of the "top vendors" and "top products" lists.
pub const DEFAULT_TOP_N: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedEntity<K> {
    pub key: K,
    pub total_revenue: Decimal,
    pub total_quantity: u64,
}

/// Entities ordered by revenue, highest first, ties by ascending key.
///
/// The sequence is finite and can be walked any number of times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ranking<K> {
    entries: Vec<RankedEntity<K>>,
}

impl<K> Ranking<K> {
    pub fn iter(&self) -> std::slice::Iter<'_, RankedEntity<K>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_vec(self) -> Vec<RankedEntity<K>> {
        self.entries
    }
}

impl<'a, K> IntoIterator for &'a Ranking<K> {
    type Item = &'a RankedEntity<K>;
    type IntoIter = std::slice::Iter<'a, RankedEntity<K>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<K> IntoIterator for Ranking<K> {
    type Item = RankedEntity<K>;
    type IntoIter = std::vec::IntoIter<RankedEntity<K>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Groups line items by `key_fn`, sums revenue and quantity per group and keeps
/// the `top_n` best sellers.
pub fn rank_by_revenue<'a, I, K, F>(items: I, key_fn: F, top_n: usize) -> Ranking<K>
where
    I: IntoIterator<Item = &'a OrderLineItem>,
    F: Fn(&OrderLineItem) -> K,
    K: Ord,
{
    let mut groups: BTreeMap<K, (Decimal, u64)> = BTreeMap::new();
    for item in items {
        let (revenue, quantity) = groups.entry(key_fn(item)).or_insert((Decimal::ZERO, 0));
        *revenue += item.total;
        *quantity += u64::from(item.quantity);
    }

    let mut entries: Vec<RankedEntity<K>> = groups
        .into_iter()
        .map(|(key, (total_revenue, total_quantity))| RankedEntity {
            key,
            total_revenue,
            total_quantity,
        })
        .collect();
    entries.sort_by(|a, b| {
        b.total_revenue
            .cmp(&a.total_revenue)
            .then_with(|| a.key.cmp(&b.key))
    });
    entries.truncate(top_n);

    Ranking { entries }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::aggregate::aggregate;
    use crate::analytics::period::Window;
    use crate::domain::{Order, OrderStatus, PaymentStatus};
    use chrono::{Duration, TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn item(order_id: &str, vendor_id: &str, product_id: &str, quantity: u32, unit_price: Decimal) -> OrderLineItem {
        OrderLineItem {
            id: format!("{order_id}-{product_id}"),
            order_id: order_id.to_string(),
            product_id: product_id.to_string(),
            vendor_id: vendor_id.to_string(),
            quantity,
            unit_price,
            total: Decimal::from(quantity) * unit_price,
        }
    }

    fn sample() -> Vec<OrderLineItem> {
        vec![
            item("o1", "v1", "p1", 2, dec!(10)),
            item("o1", "v2", "p2", 1, dec!(45)),
            item("o2", "v1", "p3", 3, dec!(5)),
            item("o3", "v3", "p4", 1, dec!(35)),
            item("o3", "v2", "p2", 1, dec!(45)),
        ]
    }

    #[test]
    fn test_groups_and_sums_per_vendor() {
        let ranking = rank_by_revenue(&sample(), |i| i.vendor_id.clone(), DEFAULT_TOP_N);
        let rows: Vec<(&str, Decimal, u64)> = ranking
            .iter()
            .map(|e| (e.key.as_str(), e.total_revenue, e.total_quantity))
            .collect();
        assert_eq!(
            rows,
            vec![("v2", dec!(90), 2), ("v1", dec!(35), 5), ("v3", dec!(35), 1)]
        );
    }

    #[test]
    fn test_ties_break_by_ascending_key() {
        let items = vec![
            item("o1", "vendor_b", "p1", 1, dec!(20)),
            item("o2", "vendor_a", "p2", 1, dec!(20)),
            item("o3", "vendor_c", "p3", 2, dec!(10)),
        ];
        let keys: Vec<String> = rank_by_revenue(&items, |i| i.vendor_id.clone(), 10)
            .into_iter()
            .map(|e| e.key)
            .collect();
        assert_eq!(keys, vec!["vendor_a", "vendor_b", "vendor_c"]);
    }

    #[test]
    fn test_truncates_and_is_non_increasing() {
        let items: Vec<OrderLineItem> = (1..=25)
            .map(|n| item(&format!("o{n}"), "v1", &format!("p{n:02}"), n, dec!(3)))
            .collect();
        let ranking = rank_by_revenue(&items, |i| i.product_id.clone(), 10);

        assert_eq!(ranking.len(), 10);
        let revenues: Vec<Decimal> = ranking.iter().map(|e| e.total_revenue).collect();
        assert!(revenues.windows(2).all(|pair| pair[0] >= pair[1]));
        assert_eq!(revenues[0], dec!(75));

        // Walking the ranking twice yields the same sequence.
        let first: Vec<_> = (&ranking).into_iter().collect();
        let second: Vec<_> = ranking.iter().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_and_zero_top_n() {
        assert!(rank_by_revenue(&Vec::<OrderLineItem>::new(), |i| i.vendor_id.clone(), 10).is_empty());
        assert!(rank_by_revenue(&sample(), |i| i.vendor_id.clone(), 0).is_empty());
    }

    #[test]
    fn test_unbounded_vendor_revenue_matches_order_aggregate() {
        let items = sample();
        let at = Utc.with_ymd_and_hms(2026, 10, 10, 0, 0, 0).unwrap();
        let orders: Vec<Order> = ["o1", "o2", "o3"]
            .iter()
            .map(|id| Order {
                id: id.to_string(),
                order_number: format!("ORD-{id}"),
                customer_id: "c1".to_string(),
                total: items.iter().filter(|i| i.order_id == *id).map(|i| i.total).sum(),
                payment_status: PaymentStatus::Paid,
                status: OrderStatus::Delivered,
                created_at: at,
            })
            .collect();

        let ranked_total: Decimal = rank_by_revenue(&items, |i| i.vendor_id.clone(), usize::MAX)
            .iter()
            .map(|e| e.total_revenue)
            .sum();
        let window = Window::new(at - Duration::days(1), at + Duration::days(1));
        assert_eq!(ranked_total, aggregate(&orders, &window, None).total);
    }
}

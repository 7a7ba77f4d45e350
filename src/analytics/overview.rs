use super::aggregate::{aggregate, MetricSummary};
use super::change::{percent_change, percent_change_count};
use super::consistency::reconcile;
use super::error::AnalyticsError;
use super::period::{PeriodCode, PeriodWindows, Window};
use super::provider::{DataProvider, ProviderError, Scope};
use super::rank::{rank_by_revenue, DEFAULT_TOP_N};
use crate::config::RollupConfig;
use crate::domain::{
    cmp_ids, Customer, Order, OrderLineItem, OrderStatus, PaymentStatus, Product, Vendor, VendorStatus,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::time::Duration;
use tracing::{debug, error, info, instrument};

/// Everything one rollup reads, fetched once per request.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    /// Orders created in the span covering the previous and current windows.
    pub orders: Vec<Order>,
    /// Line items of `orders`.
    pub line_items: Vec<OrderLineItem>,
    pub products: Vec<Product>,
    pub vendors: Vec<Vendor>,
    pub customers: Vec<Customer>,
    /// Most recent orders, independent of the windows.
    pub recent_orders: Vec<Order>,
    /// Line items of `recent_orders`.
    pub recent_line_items: Vec<OrderLineItem>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverviewOptions {
    pub top_n: usize,
    pub recent_orders_limit: usize,
    /// Allowed gap between an order total and the sum of its line items.
    pub reconciliation_tolerance: Decimal,
}

impl Default for OverviewOptions {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            recent_orders_limit: 10,
            reconciliation_tolerance: Decimal::new(1, 2),
        }
    }
}

// =============================================================================
// RESULT SHAPE
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewResult {
    pub period: PeriodCode,
    pub overview: OverviewTotals,
    pub vendors: Vec<VendorRow>,
    pub top_products: Vec<ProductRow>,
    pub recent_orders: Vec<RecentOrderRow>,
    pub pending_approvals: Vec<PendingApproval>,
    /// Orders left out of the figures because they failed reconciliation.
    pub excluded_orders: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewTotals {
    pub total_revenue: Decimal,
    pub revenue_change: Decimal,
    pub total_orders: u64,
    pub orders_change: Decimal,
    pub total_vendors: u64,
    pub vendors_change: Decimal,
    pub total_products: u64,
    pub products_change: Decimal,
    pub avg_order_value: Decimal,
    pub aov_change: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VendorRow {
    pub id: String,
    pub name: String,
    pub total_sales: Decimal,
    pub product_count: u64,
    pub order_count: u64,
    pub status: VendorStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductRow {
    pub id: String,
    pub name: String,
    pub vendor_id: String,
    pub vendor_name: Option<String>,
    pub total_sales: Decimal,
    pub units_sold: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentOrderRow {
    pub id: String,
    pub order_number: String,
    pub customer_name: Option<String>,
    pub vendor_name: Option<String>,
    pub total: Decimal,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub items_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalKind {
    Vendor,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PendingApproval {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: ApprovalKind,
}

// =============================================================================
// PURE ROLLUP
// =============================================================================

/// Builds the overview for `period` ending at `now` from an already fetched snapshot.
pub fn compute_overview(
    period: PeriodCode,
    snapshot: &Snapshot,
    now: DateTime<Utc>,
    options: &OverviewOptions,
) -> Result<OverviewResult, AnalyticsError> {
    let windows = period.windows(now)?;
    Ok(compute_for_windows(period, &windows, snapshot, options))
}

fn compute_for_windows(
    period: PeriodCode,
    windows: &PeriodWindows,
    snapshot: &Snapshot,
    options: &OverviewOptions,
) -> OverviewResult {
    let reconciled = reconcile(snapshot, options.reconciliation_tolerance);

    let paid_now = aggregate(&reconciled.orders, &windows.current, Some(PaymentStatus::Paid));
    let paid_before = aggregate(&reconciled.orders, &windows.previous, Some(PaymentStatus::Paid));
    let all_now = aggregate(&reconciled.orders, &windows.current, None);
    let all_before = aggregate(&reconciled.orders, &windows.previous, None);

    let overview = totals(windows, snapshot, &paid_now, &paid_before, &all_now, &all_before);

    // Rankings only count what was actually paid for in the current window.
    let paid_in_window: HashSet<&str> = reconciled
        .orders
        .iter()
        .filter(|o| o.payment_status == PaymentStatus::Paid && windows.current.contains(o.created_at))
        .map(|o| o.id.as_str())
        .collect();
    let ranked_items: Vec<&OrderLineItem> = reconciled
        .line_items
        .iter()
        .filter(|item| paid_in_window.contains(item.order_id.as_str()))
        .collect();

    OverviewResult {
        period,
        overview,
        vendors: vendor_rows(&ranked_items, snapshot, options.top_n),
        top_products: product_rows(&ranked_items, snapshot, options.top_n),
        recent_orders: recent_order_rows(snapshot, options.recent_orders_limit),
        pending_approvals: pending_approvals(&snapshot.vendors),
        excluded_orders: reconciled.excluded.len(),
    }
}

fn totals(
    windows: &PeriodWindows,
    snapshot: &Snapshot,
    paid_now: &MetricSummary,
    paid_before: &MetricSummary,
    all_now: &MetricSummary,
    all_before: &MetricSummary,
) -> OverviewTotals {
    let vendor_dates = || snapshot.vendors.iter().map(|v| v.created_at);
    let product_dates = || snapshot.products.iter().map(|p| p.created_at);
    let aov_now = order_value(paid_now, all_now);
    let aov_before = order_value(paid_before, all_before);

    OverviewTotals {
        total_revenue: paid_now.total.round_dp(2),
        revenue_change: percent_change(paid_now.total, paid_before.total).round_dp(2),
        total_orders: all_now.count,
        orders_change: percent_change_count(all_now.count, all_before.count).round_dp(2),
        total_vendors: snapshot.vendors.len() as u64,
        vendors_change: percent_change_count(
            created_in(&windows.current, vendor_dates()),
            created_in(&windows.previous, vendor_dates()),
        )
        .round_dp(2),
        total_products: snapshot.products.len() as u64,
        products_change: percent_change_count(
            created_in(&windows.current, product_dates()),
            created_in(&windows.previous, product_dates()),
        )
        .round_dp(2),
        avg_order_value: aov_now.round_dp(2),
        aov_change: percent_change(aov_now, aov_before).round_dp(2),
    }
}

/// Paid revenue spread over every order placed in the window.
fn order_value(paid: &MetricSummary, all: &MetricSummary) -> Decimal {
    if all.count == 0 {
        return Decimal::ZERO;
    }
    paid.total / Decimal::from(all.count)
}

fn created_in(window: &Window, dates: impl Iterator<Item = DateTime<Utc>>) -> u64 {
    dates.filter(|at| window.contains(*at)).count() as u64
}

fn vendor_rows(items: &[&OrderLineItem], snapshot: &Snapshot, top_n: usize) -> Vec<VendorRow> {
    let vendors: HashMap<&str, &Vendor> = snapshot.vendors.iter().map(|v| (v.id.as_str(), v)).collect();

    let mut product_counts: HashMap<&str, u64> = HashMap::new();
    for product in &snapshot.products {
        *product_counts.entry(product.vendor_id.as_str()).or_default() += 1;
    }
    let mut orders_per_vendor: HashMap<&str, HashSet<&str>> = HashMap::new();
    for item in items {
        orders_per_vendor
            .entry(item.vendor_id.as_str())
            .or_default()
            .insert(item.order_id.as_str());
    }

    rank_by_revenue(items.iter().copied(), |item| item.vendor_id.clone(), top_n)
        .into_iter()
        .filter_map(|entry| {
            // Reconciliation guarantees the vendor exists.
            let vendor = vendors.get(entry.key.as_str())?;
            Some(VendorRow {
                id: vendor.id.clone(),
                name: vendor.business_name.clone(),
                total_sales: entry.total_revenue.round_dp(2),
                product_count: product_counts.get(vendor.id.as_str()).copied().unwrap_or(0),
                order_count: orders_per_vendor.get(vendor.id.as_str()).map_or(0, |o| o.len() as u64),
                status: vendor.status,
                created_at: vendor.created_at,
            })
        })
        .collect()
}

fn product_rows(items: &[&OrderLineItem], snapshot: &Snapshot, top_n: usize) -> Vec<ProductRow> {
    let products: HashMap<&str, &Product> = snapshot.products.iter().map(|p| (p.id.as_str(), p)).collect();
    let vendor_names: HashMap<&str, &str> = snapshot
        .vendors
        .iter()
        .map(|v| (v.id.as_str(), v.business_name.as_str()))
        .collect();

    rank_by_revenue(items.iter().copied(), |item| item.product_id.clone(), top_n)
        .into_iter()
        .filter_map(|entry| {
            let product = products.get(entry.key.as_str())?;
            Some(ProductRow {
                id: product.id.clone(),
                name: product.name.clone(),
                vendor_id: product.vendor_id.clone(),
                vendor_name: vendor_names.get(product.vendor_id.as_str()).map(|name| name.to_string()),
                total_sales: entry.total_revenue.round_dp(2),
                units_sold: entry.total_quantity,
            })
        })
        .collect()
}

fn recent_order_rows(snapshot: &Snapshot, limit: usize) -> Vec<RecentOrderRow> {
    let customers: HashMap<&str, &str> = snapshot
        .customers
        .iter()
        .map(|c| (c.id.as_str(), c.name.as_str()))
        .collect();
    let vendor_names: HashMap<&str, &str> = snapshot
        .vendors
        .iter()
        .map(|v| (v.id.as_str(), v.business_name.as_str()))
        .collect();

    let mut items_by_order: HashMap<&str, Vec<&OrderLineItem>> = HashMap::new();
    for item in &snapshot.recent_line_items {
        items_by_order.entry(item.order_id.as_str()).or_default().push(item);
    }

    let mut orders: Vec<&Order> = snapshot.recent_orders.iter().collect();
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| cmp_ids(&a.id, &b.id)));
    orders.truncate(limit);

    orders
        .into_iter()
        .map(|order| {
            let items = items_by_order.get(order.id.as_str()).map(Vec::as_slice).unwrap_or(&[]);
            let names: BTreeSet<&str> = items
                .iter()
                .filter_map(|item| vendor_names.get(item.vendor_id.as_str()).copied())
                .collect();
            RecentOrderRow {
                id: order.id.clone(),
                order_number: order.order_number.clone(),
                customer_name: customers.get(order.customer_id.as_str()).map(|name| name.to_string()),
                vendor_name: (!names.is_empty()).then(|| names.into_iter().collect::<Vec<_>>().join(", ")),
                total: order.total,
                status: order.status,
                payment_status: order.payment_status,
                created_at: order.created_at,
                items_count: items.len(),
            }
        })
        .collect()
}

fn pending_approvals(vendors: &[Vendor]) -> Vec<PendingApproval> {
    let mut pending: Vec<&Vendor> = vendors.iter().filter(|v| v.status == VendorStatus::Pending).collect();
    pending.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| cmp_ids(&a.id, &b.id)));
    pending
        .into_iter()
        .map(|vendor| PendingApproval {
            id: vendor.id.clone(),
            name: vendor.business_name.clone(),
            created_at: vendor.created_at,
            kind: ApprovalKind::Vendor,
        })
        .collect()
}

// =============================================================================
// ENGINE
// =============================================================================

/// Fetches a snapshot through a [`DataProvider`] and rolls it up.
///
/// One engine serves both dashboards: pass [`Scope::Platform`] for the admin
/// view and [`Scope::Vendor`] for a vendor's own view. Dropping the future
/// returned by [`RollupEngine::build_overview`] cancels any fetch in flight.
pub struct RollupEngine<P> {
    provider: P,
    options: OverviewOptions,
    fetch_timeout: Duration,
    default_period: PeriodCode,
}

impl<P: DataProvider> RollupEngine<P> {
    pub fn new(provider: P, options: OverviewOptions, fetch_timeout: Duration) -> Self {
        Self {
            provider,
            options,
            fetch_timeout,
            default_period: PeriodCode::default(),
        }
    }

    pub fn from_config(provider: P, config: &RollupConfig) -> Self {
        Self::new(provider, config.overview_options(), config.fetch_timeout())
            .with_default_period(config.default_period)
    }

    /// Period used when a request leaves `period` out.
    pub fn with_default_period(mut self, period: PeriodCode) -> Self {
        self.default_period = period;
        self
    }

    pub fn default_period(&self) -> PeriodCode {
        self.default_period
    }

    pub fn options(&self) -> &OverviewOptions {
        &self.options
    }

    /// Parses the raw `period` query parameter, then builds the overview. A
    /// missing or blank value selects the engine's default period.
    pub async fn build_overview_for_query(
        &self,
        period: Option<&str>,
        scope: &Scope,
        now: DateTime<Utc>,
    ) -> Result<OverviewResult, AnalyticsError> {
        let period = PeriodCode::from_query_or(period, self.default_period)?;
        self.build_overview(period, scope, now).await
    }

    /// # Errors
    /// [`AnalyticsError::DataUnavailable`] when any fetch fails or the fetches
    /// together exceed the configured timeout. No partial result is produced.
    #[instrument(skip_all, fields(period = %period, scope = %scope))]
    pub async fn build_overview(
        &self,
        period: PeriodCode,
        scope: &Scope,
        now: DateTime<Utc>,
    ) -> Result<OverviewResult, AnalyticsError> {
        let windows = period.windows(now)?;

        let snapshot = match tokio::time::timeout(self.fetch_timeout, self.fetch_snapshot(scope, &windows)).await {
            Ok(Ok(snapshot)) => snapshot,
            Ok(Err(e)) => {
                error!(error = %e, "Analytics data fetch failed");
                return Err(e.into());
            }
            Err(_) => {
                error!(timeout_ms = self.fetch_timeout.as_millis() as u64, "Analytics data fetch timed out");
                return Err(ProviderError::Timeout(self.fetch_timeout).into());
            }
        };

        let mut result = compute_for_windows(period, &windows, &snapshot, &self.options);
        // Vendor approvals are an admin queue.
        if let Scope::Vendor(_) = scope {
            result.pending_approvals.clear();
        }
        info!(
            revenue = %result.overview.total_revenue,
            orders = result.overview.total_orders,
            excluded = result.excluded_orders,
            "Overview built"
        );
        Ok(result)
    }

    async fn fetch_snapshot(&self, scope: &Scope, windows: &PeriodWindows) -> Result<Snapshot, ProviderError> {
        let span = windows.span();
        let limit = self.options.recent_orders_limit;

        let (orders, line_items, products, vendors, customers, recent_orders) = tokio::try_join!(
            self.provider.list_orders(scope, &span),
            self.provider.list_order_line_items(scope, &span),
            self.provider.list_products(scope),
            self.provider.list_vendors(scope),
            self.provider.list_customers(),
            self.provider.list_recent_orders(scope, limit),
        )?;

        let recent_ids: Vec<String> = recent_orders.iter().map(|o| o.id.clone()).collect();
        let recent_line_items = self.provider.list_line_items_for_orders(scope, &recent_ids).await?;

        debug!(
            orders = orders.len(),
            line_items = line_items.len(),
            products = products.len(),
            vendors = vendors.len(),
            "Snapshot fetched"
        );

        Ok(Snapshot {
            orders,
            line_items,
            products,
            vendors,
            customers,
            recent_orders,
            recent_line_items,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProductStatus;
    use async_trait::async_trait;
    use chrono::{Duration as Days, TimeZone};
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 14, 12, 0, 0).unwrap()
    }

    fn days_ago(days: i64) -> DateTime<Utc> {
        now() - Days::days(days)
    }

    fn vendor(id: &str, name: &str, status: VendorStatus, created_days_ago: i64) -> Vendor {
        Vendor {
            id: id.to_string(),
            business_name: name.to_string(),
            status,
            created_at: days_ago(created_days_ago),
        }
    }

    fn product(id: &str, vendor_id: &str, price: Decimal, created_days_ago: i64) -> Product {
        Product {
            id: id.to_string(),
            vendor_id: vendor_id.to_string(),
            name: format!("Product {id}"),
            price,
            inventory: 100,
            status: ProductStatus::Active,
            created_at: days_ago(created_days_ago),
        }
    }

    /// Builds an order with a single line item priced at `total`.
    fn sale(
        snapshot: &mut Snapshot,
        id: &str,
        product: &Product,
        total: Decimal,
        days: i64,
        payment_status: PaymentStatus,
    ) {
        let order = Order {
            id: id.to_string(),
            order_number: format!("ORD-{id}"),
            customer_id: "c1".to_string(),
            total,
            payment_status,
            status: OrderStatus::Confirmed,
            created_at: days_ago(days),
        };
        let item = OrderLineItem {
            id: format!("li-{id}"),
            order_id: id.to_string(),
            product_id: product.id.clone(),
            vendor_id: product.vendor_id.clone(),
            quantity: 1,
            unit_price: total,
            total,
        };
        snapshot.recent_orders.push(order.clone());
        snapshot.recent_line_items.push(item.clone());
        snapshot.orders.push(order);
        snapshot.line_items.push(item);
    }

    fn sample() -> Snapshot {
        let mut snapshot = Snapshot {
            vendors: vec![
                vendor("v1", "Kigali Crafts", VendorStatus::Active, 100),
                vendor("v2", "Nyamirambo Coffee", VendorStatus::Active, 40),
                vendor("v3", "Kivu Textiles", VendorStatus::Pending, 3),
                vendor("v4", "Huye Honey", VendorStatus::Pending, 10),
            ],
            customers: vec![Customer {
                id: "c1".to_string(),
                name: "Aline".to_string(),
                email: "aline@example.com".to_string(),
                created_at: days_ago(200),
            }],
            ..Snapshot::default()
        };
        let basket = product("p1", "v1", dec!(100), 90);
        let coffee = product("p2", "v2", dec!(200), 35);
        snapshot.products = vec![basket.clone(), coffee.clone()];

        // Current 30 days: 300 paid over two orders, plus one failed.
        sale(&mut snapshot, "o1", &basket, dec!(100), 5, PaymentStatus::Paid);
        sale(&mut snapshot, "o2", &coffee, dec!(200), 2, PaymentStatus::Paid);
        sale(&mut snapshot, "o3", &coffee, dec!(200), 1, PaymentStatus::Failed);
        // Previous 30 days: 200 paid over one order.
        sale(&mut snapshot, "o4", &coffee, dec!(200), 45, PaymentStatus::Paid);
        snapshot
    }

    #[test]
    fn test_overview_totals_and_changes() {
        let result = compute_overview(PeriodCode::ThirtyDays, &sample(), now(), &OverviewOptions::default()).unwrap();
        let o = &result.overview;

        assert_eq!(o.total_revenue, dec!(300));
        assert_eq!(o.revenue_change, dec!(50));
        assert_eq!(o.total_orders, 3);
        assert_eq!(o.orders_change, dec!(200));
        // 300 paid over 3 orders now, 200 over 1 before.
        assert_eq!(o.avg_order_value, dec!(100));
        assert_eq!(o.avg_order_value, o.total_revenue / Decimal::from(o.total_orders));
        assert_eq!(o.aov_change, dec!(-50));
        assert_eq!(o.total_vendors, 4);
        // Two vendors joined in the current window, one in the previous.
        assert_eq!(o.vendors_change, dec!(100));
        assert_eq!(o.total_products, 2);
        // No product created in the current window, one in the previous.
        assert_eq!(o.products_change, dec!(-100));
        assert_eq!(result.excluded_orders, 0);
    }

    #[test]
    fn test_rankings_use_current_paid_sales_only() {
        let result = compute_overview(PeriodCode::ThirtyDays, &sample(), now(), &OverviewOptions::default()).unwrap();

        let vendors: Vec<(&str, Decimal, u64)> = result
            .vendors
            .iter()
            .map(|v| (v.id.as_str(), v.total_sales, v.order_count))
            .collect();
        assert_eq!(vendors, vec![("v2", dec!(200), 1), ("v1", dec!(100), 1)]);
        assert_eq!(result.vendors[0].product_count, 1);

        let products: Vec<&str> = result.top_products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(products, vec!["p2", "p1"]);
    }

    #[test]
    fn test_recent_orders_and_pending_approvals() {
        let options = OverviewOptions {
            recent_orders_limit: 3,
            ..OverviewOptions::default()
        };
        let result = compute_overview(PeriodCode::SevenDays, &sample(), now(), &options).unwrap();

        let recent: Vec<&str> = result.recent_orders.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(recent, vec!["o3", "o2", "o1"]);
        assert_eq!(result.recent_orders[0].customer_name.as_deref(), Some("Aline"));
        assert_eq!(result.recent_orders[0].vendor_name.as_deref(), Some("Nyamirambo Coffee"));
        assert_eq!(result.recent_orders[0].items_count, 1);

        let pending: Vec<&str> = result.pending_approvals.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(pending, vec!["v4", "v3"]);
    }

    #[test]
    fn test_recent_orders_with_same_timestamp_follow_id_sequence() {
        let mut snapshot = Snapshot::default();
        let basket = product("p1", "v1", dec!(100), 90);
        for id in ["order_10", "order_2", "order_1"] {
            sale(&mut snapshot, id, &basket, dec!(100), 1, PaymentStatus::Paid);
        }
        let result = compute_overview(PeriodCode::SevenDays, &snapshot, now(), &OverviewOptions::default()).unwrap();

        let recent: Vec<&str> = result.recent_orders.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(recent, vec!["order_1", "order_2", "order_10"]);
    }

    #[test]
    fn test_unknown_customer_is_reported_not_invented() {
        let mut snapshot = sample();
        snapshot.recent_orders[0].customer_id = "c404".to_string();
        let result = compute_overview(PeriodCode::ThirtyDays, &snapshot, now(), &OverviewOptions::default()).unwrap();
        let row = result.recent_orders.iter().find(|o| o.id == "o1").unwrap();
        assert_eq!(row.customer_name, None);
    }

    #[test]
    fn test_inconsistent_order_excluded_from_figures() {
        let mut snapshot = sample();
        snapshot.orders[0].total = dec!(1000);
        let result = compute_overview(PeriodCode::ThirtyDays, &snapshot, now(), &OverviewOptions::default()).unwrap();
        assert_eq!(result.excluded_orders, 1);
        assert_eq!(result.overview.total_revenue, dec!(200));
        assert!(result.vendors.iter().all(|v| v.id != "v1"));
    }

    #[test]
    fn test_empty_snapshot_is_all_zero() {
        let result = compute_overview(PeriodCode::OneYear, &Snapshot::default(), now(), &OverviewOptions::default()).unwrap();
        assert_eq!(result.overview.total_revenue, Decimal::ZERO);
        assert_eq!(result.overview.avg_order_value, Decimal::ZERO);
        assert_eq!(result.overview.revenue_change, Decimal::ZERO);
        assert!(result.vendors.is_empty());
    }

    #[test]
    fn test_serialized_shape() {
        let result = compute_overview(PeriodCode::ThirtyDays, &sample(), now(), &OverviewOptions::default()).unwrap();
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["period"], "30d");
        assert_eq!(json["overview"]["total_revenue"], 300.0);
        assert_eq!(json["pendingApprovals"][0]["type"], "vendor");
        assert!(json["recentOrders"].is_array());
        assert!(json["topProducts"].is_array());
        assert_eq!(json["vendors"][0]["status"], "active");
    }

    // --- Engine ---

    struct SnapshotProvider {
        snapshot: Snapshot,
        fail_on: Option<&'static str>,
        stall: bool,
        calls: Arc<AtomicUsize>,
    }

    impl SnapshotProvider {
        fn new(snapshot: Snapshot) -> Self {
            Self {
                snapshot,
                fail_on: None,
                stall: false,
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        async fn check(&self, resource: &'static str) -> Result<(), ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.stall {
                std::future::pending::<()>().await;
            }
            if self.fail_on == Some(resource) {
                return Err(ProviderError::Query {
                    resource,
                    reason: "connection refused".to_string(),
                });
            }
            Ok(())
        }
    }

    #[async_trait]
    impl DataProvider for SnapshotProvider {
        async fn list_orders(&self, _scope: &Scope, window: &Window) -> Result<Vec<Order>, ProviderError> {
            self.check("orders").await?;
            Ok(self.snapshot.orders.iter().filter(|o| window.contains(o.created_at)).cloned().collect())
        }

        async fn list_order_line_items(&self, _scope: &Scope, _window: &Window) -> Result<Vec<OrderLineItem>, ProviderError> {
            self.check("line_items").await?;
            Ok(self.snapshot.line_items.clone())
        }

        async fn list_products(&self, _scope: &Scope) -> Result<Vec<Product>, ProviderError> {
            self.check("products").await?;
            Ok(self.snapshot.products.clone())
        }

        async fn list_vendors(&self, _scope: &Scope) -> Result<Vec<Vendor>, ProviderError> {
            self.check("vendors").await?;
            Ok(self.snapshot.vendors.clone())
        }

        async fn list_customers(&self) -> Result<Vec<Customer>, ProviderError> {
            self.check("customers").await?;
            Ok(self.snapshot.customers.clone())
        }

        async fn list_recent_orders(&self, _scope: &Scope, _limit: usize) -> Result<Vec<Order>, ProviderError> {
            self.check("recent_orders").await?;
            Ok(self.snapshot.recent_orders.clone())
        }

        async fn list_line_items_for_orders(&self, _scope: &Scope, _ids: &[String]) -> Result<Vec<OrderLineItem>, ProviderError> {
            self.check("recent_line_items").await?;
            Ok(self.snapshot.recent_line_items.clone())
        }
    }

    fn engine(provider: SnapshotProvider) -> RollupEngine<SnapshotProvider> {
        RollupEngine::new(provider, OverviewOptions::default(), std::time::Duration::from_millis(200))
    }

    #[tokio::test]
    async fn test_engine_matches_pure_rollup() {
        let expected = compute_overview(PeriodCode::ThirtyDays, &sample(), now(), &OverviewOptions::default()).unwrap();
        let result = engine(SnapshotProvider::new(sample()))
            .build_overview(PeriodCode::ThirtyDays, &Scope::Platform, now())
            .await
            .unwrap();
        assert_eq!(result, expected);
    }

    #[tokio::test]
    async fn test_fetch_failure_is_surfaced() {
        for resource in ["orders", "vendors", "recent_line_items"] {
            let mut provider = SnapshotProvider::new(sample());
            provider.fail_on = Some(resource);

            let err = engine(provider)
                .build_overview(PeriodCode::ThirtyDays, &Scope::Platform, now())
                .await
                .unwrap_err();
            assert!(
                matches!(&err, AnalyticsError::DataUnavailable { source: ProviderError::Query { resource: r, .. } } if *r == resource),
                "{resource}: {err:?}"
            );
            assert_eq!(err.status_code(), 503);
        }
    }

    #[tokio::test]
    async fn test_stalled_fetch_times_out() {
        let mut provider = SnapshotProvider::new(sample());
        provider.stall = true;
        let calls = provider.calls.clone();

        let err = engine(provider)
            .build_overview(PeriodCode::SevenDays, &Scope::Platform, now())
            .await
            .unwrap_err();
        assert!(matches!(err, AnalyticsError::DataUnavailable { source: ProviderError::Timeout(_) }));
        // All six independent fetches were started concurrently.
        assert_eq!(calls.load(Ordering::SeqCst), 6);
    }

    #[tokio::test]
    async fn test_invalid_query_period_is_client_error() {
        let provider = SnapshotProvider::new(sample());
        let calls = provider.calls.clone();

        let err = engine(provider)
            .build_overview_for_query(Some("invalid"), &Scope::Platform, now())
            .await
            .unwrap_err();
        assert_eq!(err, AnalyticsError::InvalidPeriod("invalid".to_string()));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_configured_default_period_applies_to_queries() {
        let config = RollupConfig::from_lookup(|name| {
            (name == crate::config::ENV_DEFAULT_PERIOD).then(|| "90d".to_string())
        })
        .unwrap();
        let engine = RollupEngine::from_config(SnapshotProvider::new(sample()), &config);
        assert_eq!(engine.default_period(), PeriodCode::NinetyDays);

        let result = engine.build_overview_for_query(None, &Scope::Platform, now()).await.unwrap();
        assert_eq!(result.period, PeriodCode::NinetyDays);

        let explicit = engine
            .build_overview_for_query(Some("7d"), &Scope::Platform, now())
            .await
            .unwrap();
        assert_eq!(explicit.period, PeriodCode::SevenDays);
    }

    #[tokio::test]
    async fn test_vendor_dashboard_has_no_approval_queue() {
        let mut snapshot = sample();
        snapshot.vendors.retain(|v| v.id == "v3");
        let result = engine(SnapshotProvider::new(snapshot))
            .build_overview(PeriodCode::ThirtyDays, &Scope::Vendor("v3".to_string()), now())
            .await
            .unwrap();
        assert!(result.pending_approvals.is_empty());
        assert_eq!(result.overview.total_vendors, 1);
    }

    #[tokio::test]
    async fn test_missing_query_period_defaults_to_thirty_days() {
        let result = engine(SnapshotProvider::new(sample()))
            .build_overview_for_query(None, &Scope::Platform, now())
            .await
            .unwrap();
        assert_eq!(result.period, PeriodCode::ThirtyDays);
    }
}

use crate::analytics::{DataProvider, ProviderError, Scope, Window};
use crate::clients::{CustomerClient, LineItemClient, OrderClient, ProductClient, VendorClient};
use crate::domain::{cmp_ids, Customer, Order, OrderLineItem, Product, Vendor};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};
use std::fmt::Display;
use tracing::{debug, instrument};

/// [`DataProvider`] backed by the in-process resource actors.
///
/// Each call lists the relevant actors and filters in memory.
#[derive(Clone)]
pub struct ActorDataProvider {
    customers: CustomerClient,
    vendors: VendorClient,
    products: ProductClient,
    orders: OrderClient,
    line_items: LineItemClient,
}

fn query_failed<E: Display>(resource: &'static str) -> impl FnOnce(E) -> ProviderError {
    move |e| ProviderError::Query {
        resource,
        reason: e.to_string(),
    }
}

impl ActorDataProvider {
    pub fn new(
        customers: CustomerClient,
        vendors: VendorClient,
        products: ProductClient,
        orders: OrderClient,
        line_items: LineItemClient,
    ) -> Self {
        Self {
            customers,
            vendors,
            products,
            orders,
            line_items,
        }
    }

    async fn all_orders(&self) -> Result<Vec<Order>, ProviderError> {
        self.orders.list_orders().await.map_err(query_failed("orders"))
    }

    async fn all_line_items(&self) -> Result<Vec<OrderLineItem>, ProviderError> {
        self.line_items.list_line_items().await.map_err(query_failed("line_items"))
    }

    /// Orders visible in `scope`. For a vendor, each order is reduced to the
    /// vendor's own subtotal and orders without the vendor's items are dropped.
    async fn scoped_orders(&self, scope: &Scope) -> Result<Vec<Order>, ProviderError> {
        let orders = self.all_orders().await?;
        let Scope::Vendor(vendor_id) = scope else {
            return Ok(orders);
        };

        let mut subtotals: HashMap<String, Decimal> = HashMap::new();
        for item in self.all_line_items().await? {
            if item.vendor_id == *vendor_id {
                *subtotals.entry(item.order_id).or_default() += item.total;
            }
        }

        Ok(orders
            .into_iter()
            .filter_map(|order| {
                let subtotal = subtotals.get(&order.id).copied()?;
                Some(Order { total: subtotal, ..order })
            })
            .collect())
    }

    /// Line items visible in `scope` whose parent order satisfies `keep`.
    async fn scoped_line_items(
        &self,
        scope: &Scope,
        keep: impl Fn(&str) -> bool,
    ) -> Result<Vec<OrderLineItem>, ProviderError> {
        Ok(self
            .all_line_items()
            .await?
            .into_iter()
            .filter(|item| in_scope(scope, &item.vendor_id))
            .filter(|item| keep(&item.order_id))
            .collect())
    }
}

fn in_scope(scope: &Scope, vendor_id: &str) -> bool {
    match scope {
        Scope::Platform => true,
        Scope::Vendor(id) => id == vendor_id,
    }
}

#[async_trait]
impl DataProvider for ActorDataProvider {
    #[instrument(skip(self))]
    async fn list_orders(&self, scope: &Scope, window: &Window) -> Result<Vec<Order>, ProviderError> {
        let orders: Vec<Order> = self
            .scoped_orders(scope)
            .await?
            .into_iter()
            .filter(|order| window.contains(order.created_at))
            .collect();
        debug!(count = orders.len(), "Orders listed");
        Ok(orders)
    }

    #[instrument(skip(self))]
    async fn list_order_line_items(
        &self,
        scope: &Scope,
        window: &Window,
    ) -> Result<Vec<OrderLineItem>, ProviderError> {
        let in_window: HashSet<String> = self
            .all_orders()
            .await?
            .into_iter()
            .filter(|order| window.contains(order.created_at))
            .map(|order| order.id)
            .collect();
        self.scoped_line_items(scope, |order_id| in_window.contains(order_id)).await
    }

    #[instrument(skip(self))]
    async fn list_products(&self, scope: &Scope) -> Result<Vec<Product>, ProviderError> {
        Ok(self
            .products
            .list_products()
            .await
            .map_err(query_failed("products"))?
            .into_iter()
            .filter(|product| in_scope(scope, &product.vendor_id))
            .collect())
    }

    #[instrument(skip(self))]
    async fn list_vendors(&self, scope: &Scope) -> Result<Vec<Vendor>, ProviderError> {
        Ok(self
            .vendors
            .list_vendors()
            .await
            .map_err(query_failed("vendors"))?
            .into_iter()
            .filter(|vendor| in_scope(scope, &vendor.id))
            .collect())
    }

    #[instrument(skip(self))]
    async fn list_customers(&self) -> Result<Vec<Customer>, ProviderError> {
        self.customers.list_customers().await.map_err(query_failed("customers"))
    }

    #[instrument(skip(self))]
    async fn list_recent_orders(&self, scope: &Scope, limit: usize) -> Result<Vec<Order>, ProviderError> {
        let mut orders = self.scoped_orders(scope).await?;
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| cmp_ids(&a.id, &b.id)));
        orders.truncate(limit);
        Ok(orders)
    }

    #[instrument(skip(self, order_ids), fields(orders = order_ids.len()))]
    async fn list_line_items_for_orders(
        &self,
        scope: &Scope,
        order_ids: &[String],
    ) -> Result<Vec<OrderLineItem>, ProviderError> {
        let wanted: HashSet<&str> = order_ids.iter().map(String::as_str).collect();
        self.scoped_line_items(scope, |order_id| wanted.contains(order_id)).await
    }
}

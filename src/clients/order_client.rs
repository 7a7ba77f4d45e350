use crate::actor_framework::ResourceClient;
use crate::clients::{CustomerClient, LineItemClient, ProductClient, VendorClient};
use crate::domain::{
    Order, OrderCreate, OrderDraft, OrderLineItemCreate, OrderStatus, PaymentStatus, Product,
    ProductStatus, VendorStatus,
};
use crate::order_actor::{OrderAction, OrderError};
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Client for interacting with the Order actor.
///
/// This client handles checkout orchestration, validating the customer,
/// the products and their vendors before creating an order and its line items.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
    customer_client: CustomerClient,
    product_client: ProductClient,
    vendor_client: VendorClient,
    line_item_client: LineItemClient,
    order_sequence: Arc<AtomicU64>,
}

impl_client_methods!(OrderClient, Order, OrderError, order, orders);

impl OrderClient {
    pub fn new(
        inner: ResourceClient<Order>,
        customer_client: CustomerClient,
        product_client: ProductClient,
        vendor_client: VendorClient,
        line_item_client: LineItemClient,
    ) -> Self {
        Self {
            inner,
            customer_client,
            product_client,
            vendor_client,
            line_item_client,
            order_sequence: Arc::new(AtomicU64::new(1)),
        }
    }

    #[instrument(skip(self, draft), fields(customer_id = %draft.customer_id, items = draft.items.len()))]
    pub async fn place_order(&self, draft: OrderDraft) -> Result<String, OrderError> {
        info!("Processing place_order request");

        if draft.items.is_empty() {
            return Err(OrderError::ValidationError("Order has no items".to_string()));
        }
        if let Some(item) = draft.items.iter().find(|item| item.quantity == 0) {
            return Err(OrderError::ValidationError(format!(
                "Quantity must be positive for {}",
                item.product_id
            )));
        }

        // Step 1: Validate customer
        match self.customer_client.get_customer(draft.customer_id.clone()).await {
            Ok(Some(customer)) => info!(customer_name = %customer.name, "Customer validation successful"),
            Ok(None) => {
                error!("Customer not found");
                return Err(OrderError::InvalidCustomer(draft.customer_id));
            }
            Err(e) => {
                error!(error = %e, "Customer validation failed");
                return Err(OrderError::InvalidCustomer(format!("Customer validation failed: {}", e)));
            }
        }

        // Step 2: Validate products and their vendors
        let mut priced: Vec<(Product, u32)> = Vec::with_capacity(draft.items.len());
        for item in &draft.items {
            let product = match self.product_client.get_product(item.product_id.clone()).await {
                Ok(Some(product)) if product.status == ProductStatus::Active => product,
                Ok(Some(product)) => {
                    error!(product_id = %product.id, "Product is not active");
                    return Err(OrderError::InvalidProduct(format!("{} is not active", product.id)));
                }
                Ok(None) => {
                    error!(product_id = %item.product_id, "Product not found");
                    return Err(OrderError::InvalidProduct(item.product_id.clone()));
                }
                Err(e) => {
                    error!(error = %e, "Product validation failed");
                    return Err(OrderError::InvalidProduct(format!("Product validation failed: {}", e)));
                }
            };

            match self.vendor_client.get_vendor(product.vendor_id.clone()).await {
                Ok(Some(vendor)) if vendor.status == VendorStatus::Active => {
                    debug!(vendor_name = %vendor.business_name, "Vendor validation successful")
                }
                Ok(_) => {
                    error!(vendor_id = %product.vendor_id, "Vendor is not active");
                    return Err(OrderError::VendorUnavailable(product.vendor_id.clone()));
                }
                Err(e) => {
                    error!(error = %e, "Vendor validation failed");
                    return Err(OrderError::VendorUnavailable(format!("Vendor validation failed: {}", e)));
                }
            }

            priced.push((product, item.quantity));
        }

        // Step 3: Reserve stock
        let mut reserved: Vec<(String, u32)> = Vec::with_capacity(priced.len());
        for (product, quantity) in &priced {
            if let Err(e) = self.product_client.reserve_stock(product.id.clone(), *quantity).await {
                error!(error = %e, product_id = %product.id, "Stock reservation failed");
                self.release_reserved(&reserved).await;
                return Err(OrderError::InsufficientStock(format!("Stock reservation failed: {}", e)));
            }
            reserved.push((product.id.clone(), *quantity));
        }

        info!("Stock reserved successfully");

        // Step 4: Create the order at current prices
        let total: Decimal = priced
            .iter()
            .map(|(product, quantity)| Decimal::from(*quantity) * product.price)
            .sum();
        let payload = OrderCreate {
            order_number: format!("ORD-{:06}", self.order_sequence.fetch_add(1, Ordering::SeqCst)),
            customer_id: draft.customer_id,
            total,
            created_at: draft.placed_at,
        };

        let order_id = match self.inner.create(payload).await {
            Ok(id) => id,
            Err(e) => {
                error!(error = %e, "Order creation failed");
                self.release_reserved(&reserved).await;
                return Err(e.into());
            }
        };

        // Step 5: Record line items
        for (product, quantity) in priced {
            let item = OrderLineItemCreate {
                order_id: order_id.clone(),
                product_id: product.id,
                vendor_id: product.vendor_id,
                quantity,
                unit_price: product.price,
            };
            if let Err(e) = self.line_item_client.add_line_item(item).await {
                error!(error = %e, order_id = %order_id, "Line item creation failed");
                self.release_reserved(&reserved).await;
                self.abandon_order(&order_id).await;
                return Err(e);
            }
        }

        info!(order_id = %order_id, total = %total, "Order placed successfully");
        Ok(order_id)
    }

    #[instrument(skip(self))]
    pub async fn record_payment(&self, id: String, status: PaymentStatus) -> Result<Order, OrderError> {
        debug!("Sending request");
        self.inner
            .perform_action(id, OrderAction::RecordPayment(status))
            .await
            .map_err(OrderError::from)
    }

    #[instrument(skip(self))]
    pub async fn update_status(&self, id: String, status: OrderStatus) -> Result<Order, OrderError> {
        debug!("Sending request");
        self.inner
            .perform_action(id, OrderAction::UpdateStatus(status))
            .await
            .map_err(OrderError::from)
    }

    /// Marks a partially written order as failed and cancelled so it is not
    /// mistaken for a live sale.
    async fn abandon_order(&self, order_id: &str) {
        let actions = [
            OrderAction::RecordPayment(PaymentStatus::Failed),
            OrderAction::UpdateStatus(OrderStatus::Cancelled),
        ];
        for action in actions {
            if let Err(e) = self.inner.perform_action(order_id.to_string(), action).await {
                warn!(error = %e, order_id = %order_id, ?action, "Failed to abandon partial order");
            }
        }
    }

    async fn release_reserved(&self, reserved: &[(String, u32)]) {
        for (product_id, quantity) in reserved {
            if let Err(e) = self.product_client.release_stock(product_id.clone(), *quantity).await {
                warn!(error = %e, product_id = %product_id, "Failed to release reserved stock");
            }
        }
    }
}

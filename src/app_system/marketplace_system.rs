use crate::actor_framework::ResourceActor;
use crate::app_system::{ActorDataProvider, SystemError};
use crate::clients::{CustomerClient, LineItemClient, OrderClient, ProductClient, VendorClient};
use crate::domain::{Customer, Order, OrderLineItem, Product, Vendor};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{error, info};

const ACTOR_BUFFER: usize = 32;

/// Sequential ids of the form `<prefix>_<n>`, starting at 1.
fn id_generator(prefix: &'static str) -> impl Fn() -> String + Send + Sync + 'static {
    let counter = Arc::new(AtomicU64::new(1));
    move || format!("{}_{}", prefix, counter.fetch_add(1, Ordering::SeqCst))
}

/// The marketplace application: one resource actor per record type, wired
/// together through their clients.
///
/// Responsible for starting up actors, wiring them together, and handling shutdown.
pub struct MarketplaceSystem {
    pub customer_client: CustomerClient,
    pub vendor_client: VendorClient,
    pub product_client: ProductClient,
    pub order_client: OrderClient,
    pub line_item_client: LineItemClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl MarketplaceSystem {
    /// Spawns the actors. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (customer_actor, customer_resource_client) =
            ResourceActor::<Customer>::new(ACTOR_BUFFER, id_generator("customer"));
        let customer_client = CustomerClient::new(customer_resource_client);
        let customer_handle = tokio::spawn(customer_actor.run());

        let (vendor_actor, vendor_resource_client) =
            ResourceActor::<Vendor>::new(ACTOR_BUFFER, id_generator("vendor"));
        let vendor_client = VendorClient::new(vendor_resource_client);
        let vendor_handle = tokio::spawn(vendor_actor.run());

        let (product_actor, product_resource_client) =
            ResourceActor::<Product>::new(ACTOR_BUFFER, id_generator("product"));
        let product_client = ProductClient::new(product_resource_client);
        let product_handle = tokio::spawn(product_actor.run());

        let (line_item_actor, line_item_resource_client) =
            ResourceActor::<OrderLineItem>::new(ACTOR_BUFFER, id_generator("line_item"));
        let line_item_client = LineItemClient::new(line_item_resource_client);
        let line_item_handle = tokio::spawn(line_item_actor.run());

        let (order_actor, order_resource_client) =
            ResourceActor::<Order>::new(ACTOR_BUFFER, id_generator("order"));
        let order_client = OrderClient::new(
            order_resource_client,
            customer_client.clone(),
            product_client.clone(),
            vendor_client.clone(),
            line_item_client.clone(),
        );
        let order_handle = tokio::spawn(order_actor.run());

        Self {
            customer_client,
            vendor_client,
            product_client,
            order_client,
            line_item_client,
            handles: vec![
                customer_handle,
                vendor_handle,
                product_handle,
                line_item_handle,
                order_handle,
            ],
        }
    }

    /// Read access for the rollup engine.
    ///
    /// The provider holds client handles, so it must be dropped before
    /// [`MarketplaceSystem::shutdown`] can complete.
    pub fn data_provider(&self) -> ActorDataProvider {
        ActorDataProvider::new(
            self.customer_client.clone(),
            self.vendor_client.clone(),
            self.product_client.clone(),
            self.order_client.clone(),
            self.line_item_client.clone(),
        )
    }

    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down system...");

        // Actors stop once every client handle is gone.
        drop(self.order_client);
        drop(self.line_item_client);
        drop(self.product_client);
        drop(self.vendor_client);
        drop(self.customer_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(SystemError::ActorTask(e.to_string()));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}

impl Default for MarketplaceSystem {
    fn default() -> Self {
        Self::new()
    }
}

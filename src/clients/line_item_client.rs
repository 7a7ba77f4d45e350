use crate::actor_framework::ResourceClient;
use crate::domain::{OrderLineItem, OrderLineItemCreate};
use crate::order_actor::OrderError;
use tracing::{debug, instrument};

/// Client for the line item actor. Line items are only written by
/// [`crate::clients::OrderClient::place_order`].
#[derive(Clone)]
pub struct LineItemClient {
    inner: ResourceClient<OrderLineItem>,
}

impl_basic_client!(LineItemClient, OrderLineItem, OrderError, line_item, line_items);

impl LineItemClient {
    #[instrument(skip(self, item), fields(order_id = %item.order_id, product_id = %item.product_id))]
    pub(crate) async fn add_line_item(&self, item: OrderLineItemCreate) -> Result<String, OrderError> {
        debug!("Sending request");
        self.inner.create(item).await.map_err(OrderError::from)
    }
}

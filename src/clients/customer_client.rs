use crate::actor_framework::ResourceClient;
use crate::customer_actor::CustomerError;
use crate::domain::{Customer, CustomerCreate};
use tracing::{debug, instrument};

/// Client for interacting with the Customer actor.
#[derive(Clone)]
pub struct CustomerClient {
    inner: ResourceClient<Customer>,
}

impl_basic_client!(CustomerClient, Customer, CustomerError, customer, customers);

impl CustomerClient {
    #[instrument(skip(self, customer), fields(customer_name = %customer.name))]
    pub async fn register_customer(&self, customer: CustomerCreate) -> Result<String, CustomerError> {
        debug!("Sending request");
        self.inner.create(customer).await.map_err(CustomerError::from)
    }
}

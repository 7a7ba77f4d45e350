use crate::actor_framework::ResourceClient;
use crate::domain::{Vendor, VendorCreate, VendorStatus};
use crate::vendor_actor::{VendorAction, VendorError};
use tracing::{debug, info, instrument};

/// Client for interacting with the Vendor actor.
#[derive(Clone)]
pub struct VendorClient {
    inner: ResourceClient<Vendor>,
}

impl_basic_client!(VendorClient, Vendor, VendorError, vendor, vendors);

impl VendorClient {
    /// Files a vendor application. The vendor starts out pending approval.
    #[instrument(skip(self, vendor), fields(business_name = %vendor.business_name))]
    pub async fn register_vendor(&self, vendor: VendorCreate) -> Result<String, VendorError> {
        debug!("Sending request");
        self.inner.create(vendor).await.map_err(VendorError::from)
    }

    #[instrument(skip(self))]
    pub async fn review_vendor(&self, id: String, action: VendorAction) -> Result<VendorStatus, VendorError> {
        debug!("Sending request");
        let status = self.inner.perform_action(id, action).await.map_err(VendorError::from)?;
        info!(status = %status, "Vendor reviewed");
        Ok(status)
    }

    pub async fn approve_vendor(&self, id: String) -> Result<VendorStatus, VendorError> {
        self.review_vendor(id, VendorAction::Approve).await
    }
}

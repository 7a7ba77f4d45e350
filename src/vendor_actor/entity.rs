use super::actions::VendorAction;
use crate::actor_framework::Entity;
use crate::domain::{Vendor, VendorCreate, VendorStatus};

impl Entity for Vendor {
    type Id = String;
    type CreatePayload = VendorCreate;
    type Action = VendorAction;
    /// The status after the transition.
    type ActionResult = VendorStatus;

    const KIND: &'static str = "vendor";

    fn id(&self) -> &String {
        &self.id
    }

    fn from_create(id: String, payload: VendorCreate) -> Result<Self, String> {
        if payload.business_name.trim().is_empty() {
            return Err("Business name required".to_string());
        }
        Ok(Self {
            id,
            business_name: payload.business_name,
            status: VendorStatus::Pending,
            created_at: payload.created_at,
        })
    }

    /// Applies an account review transition.
    ///
    /// # Errors
    /// Returns an error when the action is not valid from the current status.
    fn handle_action(&mut self, action: VendorAction) -> Result<VendorStatus, String> {
        let next = match (self.status, action) {
            (VendorStatus::Pending, VendorAction::Approve) => VendorStatus::Active,
            (VendorStatus::Pending, VendorAction::Reject) => VendorStatus::Rejected,
            (VendorStatus::Active, VendorAction::Suspend) => VendorStatus::Suspended,
            (VendorStatus::Suspended, VendorAction::Reinstate) => VendorStatus::Active,
            (status, action) => {
                return Err(format!("Cannot {:?} a vendor that is {}", action, status));
            }
        };
        self.status = next;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn pending() -> Vendor {
        Vendor::from_create("vendor_1".into(), VendorCreate::new("Kigali Crafts", Utc::now())).unwrap()
    }

    #[test]
    fn test_approval_workflow() {
        let mut vendor = pending();
        assert_eq!(vendor.status, VendorStatus::Pending);
        assert_eq!(vendor.handle_action(VendorAction::Approve), Ok(VendorStatus::Active));
        assert_eq!(vendor.handle_action(VendorAction::Suspend), Ok(VendorStatus::Suspended));
        assert_eq!(vendor.handle_action(VendorAction::Reinstate), Ok(VendorStatus::Active));
    }

    #[test]
    fn test_rejected_vendor_cannot_be_approved() {
        let mut vendor = pending();
        vendor.handle_action(VendorAction::Reject).unwrap();
        assert!(vendor.handle_action(VendorAction::Approve).is_err());
        assert_eq!(vendor.status, VendorStatus::Rejected);
    }

    #[test]
    fn test_blank_business_name_rejected() {
        assert!(Vendor::from_create("vendor_1".into(), VendorCreate::new("  ", Utc::now())).is_err());
    }
}

/// Account review actions an admin can take on a vendor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VendorAction {
    /// pending -> active
    Approve,
    /// pending -> rejected
    Reject,
    /// active -> suspended
    Suspend,
    /// suspended -> active
    Reinstate,
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Account status of a vendor profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VendorStatus {
    Pending,
    Active,
    Suspended,
    Rejected,
}

impl fmt::Display for VendorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            VendorStatus::Pending => "pending",
            VendorStatus::Active => "active",
            VendorStatus::Suspended => "suspended",
            VendorStatus::Rejected => "rejected",
        };
        f.write_str(s)
    }
}

/// A profile with the vendor role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vendor {
    pub id: String,
    pub business_name: String,
    pub status: VendorStatus,
    pub created_at: DateTime<Utc>,
}

/// Payload for a vendor application. New vendors always start as pending.
#[derive(Debug, Clone)]
pub struct VendorCreate {
    pub business_name: String,
    pub created_at: DateTime<Utc>,
}

impl VendorCreate {
    pub fn new(business_name: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            business_name: business_name.into(),
            created_at,
        }
    }
}

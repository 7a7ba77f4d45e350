use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered storefront customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Payload for registering a customer.
#[derive(Debug, Clone)]
pub struct CustomerCreate {
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl CustomerCreate {
    pub fn new(name: impl Into<String>, email: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            created_at,
        }
    }
}

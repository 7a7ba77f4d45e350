//! Customer records. Customers carry no custom actions.

pub mod entity;
pub mod error;

pub use error::*;

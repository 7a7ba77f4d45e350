//! Marketplace entities read by the rollup engine.

pub mod customer;
pub mod id;
pub mod line_item;
pub mod order;
pub mod product;
pub mod vendor;

pub use customer::*;
pub use id::cmp_ids;
pub use line_item::*;
pub use order::*;
pub use product::*;
pub use vendor::*;

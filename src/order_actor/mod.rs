//! Orders and their line items.

mod actions;
pub mod entity;
pub mod error;
pub mod line_item;

pub use actions::*;
pub use error::*;

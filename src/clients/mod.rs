//! Typed clients for the resource actors.

#[macro_use]
mod macros;

mod customer_client;
mod line_item_client;
mod order_client;
mod product_client;
mod vendor_client;

pub use customer_client::CustomerClient;
pub use line_item_client::LineItemClient;
pub use order_client::OrderClient;
pub use product_client::ProductClient;
pub use vendor_client::VendorClient;

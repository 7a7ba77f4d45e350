//! Marketplace records managed by resource actors, and the analytics rollups
//! computed over them for the admin and vendor dashboards.

pub mod actor_framework;
pub mod analytics;
pub mod app_system;
pub mod clients;
pub mod config;
pub mod customer_actor;
pub mod domain;
pub mod order_actor;
pub mod product_actor;
pub mod vendor_actor;

#[cfg(test)]
mod mock_framework;

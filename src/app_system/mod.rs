//! System orchestration, startup, and shutdown logic.

pub mod data_provider;
pub mod error;
pub mod marketplace_system;
pub mod seed;
pub mod tracing;

pub use self::data_provider::*;
pub use self::error::*;
pub use self::marketplace_system::*;
pub use self::seed::*;
pub use self::tracing::*;

//! # Analytics rollups
//!
//! Turns a snapshot of marketplace records into the dashboard overview:
//!
//! - [`period`] resolves a period code into the current and comparison windows
//! - [`aggregate`] sums, counts and averages orders inside a window
//! - [`change`] computes period-over-period deltas
//! - [`rank`] groups line items by an entity key and ranks them by revenue
//! - [`consistency`] drops orders whose records do not reconcile
//! - [`overview`] composes all of the above behind a [`DataProvider`]
//!
//! Every computation is pure over its inputs. Only [`RollupEngine`] performs I/O,
//! and it does so exclusively through the injected [`DataProvider`].

pub mod aggregate;
pub mod change;
pub mod consistency;
pub mod currency;
pub mod error;
pub mod overview;
pub mod period;
pub mod provider;
pub mod rank;

pub use aggregate::{aggregate, MetricSummary};
pub use change::{percent_change, percent_change_count};
pub use consistency::{reconcile, Reconciled};
pub use currency::{format_amount, Currency, UnknownCurrency};
pub use error::AnalyticsError;
pub use overview::{compute_overview, OverviewOptions, OverviewResult, RollupEngine, Snapshot};
pub use period::{resolve_period, PeriodCode, PeriodWindows, Window};
pub use provider::{DataProvider, ProviderError, Scope};
pub use rank::{rank_by_revenue, RankedEntity, Ranking, DEFAULT_TOP_N};

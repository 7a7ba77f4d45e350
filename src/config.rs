//! Runtime configuration for the rollup engine.
//!
//! Every setting has a default and can be overridden through a `ROLLUP_*`
//! environment variable. Blank variables count as unset.

use crate::analytics::{Currency, OverviewOptions, PeriodCode, DEFAULT_TOP_N};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

pub const ENV_DEFAULT_PERIOD: &str = "ROLLUP_DEFAULT_PERIOD";
pub const ENV_TOP_N: &str = "ROLLUP_TOP_N";
pub const ENV_RECENT_ORDERS: &str = "ROLLUP_RECENT_ORDERS";
pub const ENV_TOLERANCE: &str = "ROLLUP_TOLERANCE";
pub const ENV_FETCH_TIMEOUT_MS: &str = "ROLLUP_FETCH_TIMEOUT_MS";
pub const ENV_CURRENCY: &str = "ROLLUP_CURRENCY";

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RollupConfig {
    /// Period used when a request does not name one.
    pub default_period: PeriodCode,
    pub top_n: usize,
    pub recent_orders_limit: usize,
    pub reconciliation_tolerance: Decimal,
    pub fetch_timeout_ms: u64,
    pub currency: Currency,
}

impl Default for RollupConfig {
    fn default() -> Self {
        Self {
            default_period: PeriodCode::default(),
            top_n: DEFAULT_TOP_N,
            recent_orders_limit: 10,
            reconciliation_tolerance: Decimal::new(1, 2),
            fetch_timeout_ms: 5_000,
            currency: Currency::Rwf,
        }
    }
}

impl RollupConfig {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if any variable is present but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(period) = parse_var::<PeriodCode, _>(&lookup, ENV_DEFAULT_PERIOD)? {
            config.default_period = period;
        }
        if let Some(top_n) = parse_var::<usize, _>(&lookup, ENV_TOP_N)? {
            config.top_n = top_n;
        }
        if let Some(limit) = parse_var::<usize, _>(&lookup, ENV_RECENT_ORDERS)? {
            config.recent_orders_limit = limit;
        }
        if let Some(tolerance) = parse_var::<Decimal, _>(&lookup, ENV_TOLERANCE)? {
            if tolerance.is_sign_negative() {
                return Err(ConfigError::Invalid {
                    name: ENV_TOLERANCE,
                    reason: "must not be negative".to_string(),
                });
            }
            config.reconciliation_tolerance = tolerance;
        }
        if let Some(timeout) = parse_var::<u64, _>(&lookup, ENV_FETCH_TIMEOUT_MS)? {
            if timeout == 0 {
                return Err(ConfigError::Invalid {
                    name: ENV_FETCH_TIMEOUT_MS,
                    reason: "must be greater than zero".to_string(),
                });
            }
            config.fetch_timeout_ms = timeout;
        }
        if let Some(currency) = parse_var::<Currency, _>(&lookup, ENV_CURRENCY)? {
            config.currency = currency;
        }

        Ok(config)
    }

    pub fn overview_options(&self) -> OverviewOptions {
        OverviewOptions {
            top_n: self.top_n,
            recent_orders_limit: self.recent_orders_limit,
            reconciliation_tolerance: self.reconciliation_tolerance,
        }
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }
}

fn env_string<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name).and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn parse_var<T, F>(lookup: &F, name: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    let Some(v) = env_string(lookup, name) else {
        return Ok(None);
    };
    v.parse::<T>().map(Some).map_err(|e| ConfigError::Invalid {
        name,
        reason: e.to_string(),
    })
}

use super::provider::ProviderError;
use thiserror::Error;

/// Failures surfaced by the rollup engine.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalyticsError {
    #[error("Invalid period: {0} (expected one of 7d, 30d, 90d, 1y)")]
    InvalidPeriod(String),
    #[error("Analytics data unavailable: {source}")]
    DataUnavailable {
        #[from]
        source: ProviderError,
    },
    #[error("Inconsistent order {order_id}: {reason}")]
    InconsistentData { order_id: String, reason: String },
}

impl AnalyticsError {
    /// HTTP status a request handler should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            AnalyticsError::InvalidPeriod(_) => 400,
            AnalyticsError::DataUnavailable { .. } => 503,
            AnalyticsError::InconsistentData { .. } => 422,
        }
    }

    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }
}

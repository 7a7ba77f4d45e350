use super::error::AnalyticsError;
use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Symbolic selector for the reporting window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PeriodCode {
    #[serde(rename = "7d")]
    SevenDays,
    #[default]
    #[serde(rename = "30d")]
    ThirtyDays,
    #[serde(rename = "90d")]
    NinetyDays,
    #[serde(rename = "1y")]
    OneYear,
}

impl PeriodCode {
    pub const ALL: [PeriodCode; 4] = [
        PeriodCode::SevenDays,
        PeriodCode::ThirtyDays,
        PeriodCode::NinetyDays,
        PeriodCode::OneYear,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PeriodCode::SevenDays => "7d",
            PeriodCode::ThirtyDays => "30d",
            PeriodCode::NinetyDays => "90d",
            PeriodCode::OneYear => "1y",
        }
    }

    /// Parses the `period` query parameter. A missing or blank value selects
    /// the default (`30d`); anything else must be a known code.
    pub fn from_query(value: Option<&str>) -> Result<Self, AnalyticsError> {
        Self::from_query_or(value, PeriodCode::default())
    }

    /// Like [`PeriodCode::from_query`], with `fallback` for a missing or blank value.
    pub fn from_query_or(value: Option<&str>, fallback: PeriodCode) -> Result<Self, AnalyticsError> {
        match value.map(str::trim) {
            None | Some("") => Ok(fallback),
            Some(code) => code.parse(),
        }
    }

    /// Start of the current window ending at `now`. `1y` is a calendar year.
    fn start_before(self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            PeriodCode::SevenDays => now.checked_sub_signed(Duration::days(7)),
            PeriodCode::ThirtyDays => now.checked_sub_signed(Duration::days(30)),
            PeriodCode::NinetyDays => now.checked_sub_signed(Duration::days(90)),
            PeriodCode::OneYear => now.checked_sub_months(Months::new(12)),
        }
    }

    /// Resolves the current window `[now - duration, now)` and the equally long
    /// window immediately before it.
    pub fn windows(self, now: DateTime<Utc>) -> Result<PeriodWindows, AnalyticsError> {
        let out_of_range = || AnalyticsError::InvalidPeriod(format!("{} before {} is out of range", self, now));

        let current_start = self.start_before(now).ok_or_else(out_of_range)?;
        let length = now - current_start;
        let previous_start = current_start.checked_sub_signed(length).ok_or_else(out_of_range)?;

        Ok(PeriodWindows {
            current: Window::new(current_start, now),
            previous: Window::new(previous_start, current_start),
        })
    }
}

impl fmt::Display for PeriodCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PeriodCode {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PeriodCode::ALL
            .into_iter()
            .find(|code| code.as_str() == s)
            .ok_or_else(|| AnalyticsError::InvalidPeriod(s.to_string()))
    }
}

/// Half-open time range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Window {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Window {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at < self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PeriodWindows {
    pub current: Window,
    pub previous: Window,
}

impl PeriodWindows {
    /// The single range covering both windows, used for fetching.
    pub fn span(&self) -> Window {
        Window::new(self.previous.start, self.current.end)
    }
}

/// Resolves a raw period code against `now`.
pub fn resolve_period(code: &str, now: DateTime<Utc>) -> Result<PeriodWindows, AnalyticsError> {
    code.parse::<PeriodCode>()?.windows(now)
}

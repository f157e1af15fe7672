//! Query builders for the dashboard endpoints

use chrono::NaiveDate;
use sentiq_common::{Error, Platform, Result};
use std::fmt;
use std::str::FromStr;

/// Platform selector; `All` sends no platform parameter at all
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PlatformFilter {
    #[default]
    All,
    Only(Platform),
}

impl PlatformFilter {
    pub fn platform(&self) -> Option<&Platform> {
        match self {
            PlatformFilter::All => None,
            PlatformFilter::Only(platform) => Some(platform),
        }
    }
}

impl FromStr for PlatformFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(Error::Validation("platform must not be empty".to_string()));
        }
        if trimmed.eq_ignore_ascii_case("all") {
            Ok(PlatformFilter::All)
        } else {
            Ok(PlatformFilter::Only(Platform::from(trimmed)))
        }
    }
}

impl fmt::Display for PlatformFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformFilter::All => f.write_str("all"),
            PlatformFilter::Only(platform) => write!(f, "{}", platform),
        }
    }
}

/// `GET /batches/{id}/metrics` parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsQuery {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub platform: PlatformFilter,
}

impl MetricsQuery {
    /// Rejects a range whose start is after its end
    pub fn new(from: NaiveDate, to: NaiveDate, platform: PlatformFilter) -> Result<Self> {
        if from > to {
            return Err(Error::Validation(format!(
                "date range starts after it ends ({} > {})",
                from, to
            )));
        }
        Ok(Self { from, to, platform })
    }

    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("from_date", self.from.format("%Y-%m-%d").to_string()),
            ("to_date", self.to.format("%Y-%m-%d").to_string()),
        ];
        if let Some(platform) = self.platform.platform() {
            params.push(("platforms", platform.as_str().to_string()));
        }
        params
    }
}

impl Default for MetricsQuery {
    /// Calendar year 2024, all platforms
    fn default() -> Self {
        Self {
            from: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or(NaiveDate::MIN),
            to: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap_or(NaiveDate::MAX),
            platform: PlatformFilter::All,
        }
    }
}

pub const DEFAULT_REVIEW_LIMIT: u32 = 50;

/// `GET /batches/{id}/reviews` parameters; sampling is always random
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewQuery {
    pub platform: PlatformFilter,
    pub limit: u32,
}

impl ReviewQuery {
    pub fn new(platform: PlatformFilter, limit: u32) -> Result<Self> {
        if limit == 0 {
            return Err(Error::Validation("review limit must be at least 1".to_string()));
        }
        Ok(Self { platform, limit })
    }

    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("sort", "random".to_string()), ("limit", self.limit.to_string())];
        if let Some(platform) = self.platform.platform() {
            params.push(("platform", platform.as_str().to_string()));
        }
        params
    }
}

impl Default for ReviewQuery {
    fn default() -> Self {
        Self {
            platform: PlatformFilter::All,
            limit: DEFAULT_REVIEW_LIMIT,
        }
    }
}

//! sentiq-dash library - batch metrics and review samples
//!
//! - [`client`]: metrics and reviews endpoints
//! - [`query`]: date range, platform filter and sample size
//! - [`metrics`] and [`reviews`]: derived display values
//! - [`view`]: terminal rendering

pub mod client;
pub mod metrics;
pub mod query;
pub mod reviews;
pub mod view;

pub use client::DashboardClient;
pub use metrics::MetricsSummary;
pub use query::{MetricsQuery, PlatformFilter, ReviewQuery};
pub use reviews::ReviewRow;

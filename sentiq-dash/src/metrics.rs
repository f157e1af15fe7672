//! Metrics aggregation
//!
//! Derives everything the metrics view shows from a decoded
//! [`BatchMetrics`]: platform counters, the overall sentiment split with
//! percentage labels, and per-aspect bars sharing one axis.

use sentiq_common::api::{BatchMetrics, SentimentCounts};
use sentiq_common::{Aspect, Platform, Sentiment};
use std::collections::BTreeMap;

/// Axis maximum used when every aspect count is zero
pub const EMPTY_AXIS_MAX: u64 = 10;

/// Slices at or below this share get no percentage label
const LABEL_THRESHOLD_PERCENT: u64 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformTotals {
    /// Dedicated counters, zero when the backend omitted the platform
    pub counted: Vec<(Platform, u64)>,
    /// Sum over every platform the backend reported, counted or not
    pub total: u64,
}

pub fn platform_totals(counts: &BTreeMap<Platform, u64>) -> PlatformTotals {
    let counted = Platform::COUNTED
        .iter()
        .map(|p| (p.clone(), counts.get(p).copied().unwrap_or(0)))
        .collect();
    PlatformTotals {
        counted,
        total: counts.values().fold(0u64, |acc, v| acc.saturating_add(*v)),
    }
}

/// Share of `total` as a label like `"53%"`, empty for shares of 5% or less
pub fn percent_label(value: u64, total: u64) -> String {
    if total == 0 {
        return String::new();
    }
    let pct = (value as f64 * 100.0 / total as f64).round() as u64;
    if pct > LABEL_THRESHOLD_PERCENT {
        format!("{}%", pct)
    } else {
        String::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentimentSlice {
    pub sentiment: Sentiment,
    pub count: u64,
    pub label: String,
}

/// Positive, negative, neutral slices of the overall split
pub fn overall_breakdown(counts: &SentimentCounts) -> Vec<SentimentSlice> {
    let total = counts.total();
    Sentiment::ALL
        .iter()
        .map(|&sentiment| {
            let count = counts.get(sentiment);
            SentimentSlice {
                sentiment,
                count,
                label: percent_label(count, total),
            }
        })
        .collect()
}

/// Shared bar-chart maximum: largest single count plus 10%, rounded up
pub fn axis_max(aspects: &[(Aspect, SentimentCounts)]) -> u64 {
    let max = aspects.iter().map(|(_, c)| c.max()).max().unwrap_or(0);
    if max == 0 {
        return EMPTY_AXIS_MAX;
    }
    max.saturating_mul(11).div_ceil(10)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AspectSummary {
    pub aspect: Aspect,
    pub title: String,
    pub counts: SentimentCounts,
    pub mentions: u64,
}

pub fn aspect_summaries(aspects: &[(Aspect, SentimentCounts)]) -> Vec<AspectSummary> {
    aspects
        .iter()
        .map(|(aspect, counts)| AspectSummary {
            aspect: aspect.clone(),
            title: aspect.title(),
            counts: *counts,
            mentions: counts.total(),
        })
        .collect()
}

/// Everything the metrics view renders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsSummary {
    pub platforms: PlatformTotals,
    pub overall: Vec<SentimentSlice>,
    pub overall_total: u64,
    pub aspects: Vec<AspectSummary>,
    pub axis_max: u64,
}

impl MetricsSummary {
    pub fn from_metrics(metrics: &BatchMetrics) -> Self {
        Self {
            platforms: platform_totals(&metrics.platform_counts),
            overall: overall_breakdown(&metrics.overall_sentiment),
            overall_total: metrics.overall_sentiment.total(),
            aspects: aspect_summaries(&metrics.aspect_metrics),
            axis_max: axis_max(&metrics.aspect_metrics),
        }
    }
}

//! QC session wire types
//!
//! `GET /qc-sessions/{id}` returns
//! `{ "items": [QcItem...], "meta": { "progress": SessionProgress } }`;
//! `PATCH /qc-items/{id}` takes an [`ItemUpdate`] body.

use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use crate::labels::{Aspect, Sentiment};

/// QC item identifier (stable across reloads)
pub type ItemId = u64;

/// Whether a human has confirmed or corrected the prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QcStatus {
    #[serde(alias = "Pending", alias = "PENDING")]
    Pending,
    #[serde(alias = "Reviewed", alias = "REVIEWED")]
    Reviewed,
}

impl QcStatus {
    pub fn label(&self) -> &'static str {
        match self {
            QcStatus::Pending => "Pending",
            QcStatus::Reviewed => "Reviewed",
        }
    }
}

/// One review-aspect prediction awaiting or having received human audit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QcItem {
    pub qc_item_id: ItemId,
    pub review_content: String,
    pub aspect: Aspect,
    pub predicted_sentiment: Sentiment,
    /// Classifier confidence, clamped into [0, 1] on decode
    #[serde(deserialize_with = "clamped_confidence")]
    pub confidence: f64,
    pub status: QcStatus,
    /// Human correction, once the backend has recorded one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_sentiment: Option<Sentiment>,
}

impl QcItem {
    /// Correction if one was recorded, otherwise the prediction
    pub fn effective_sentiment(&self) -> Sentiment {
        self.correct_sentiment.unwrap_or(self.predicted_sentiment)
    }

    pub fn is_reviewed(&self) -> bool {
        self.status == QcStatus::Reviewed
    }

    pub fn confidence_tier(&self) -> ConfidenceTier {
        ConfidenceTier::from_confidence(self.confidence)
    }

    /// Confidence as a rounded percentage (0..=100)
    pub fn confidence_percent(&self) -> u8 {
        (self.confidence * 100.0).round().clamp(0.0, 100.0) as u8
    }
}

fn clamped_confidence<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    if raw.is_nan() {
        warn!("Confidence is NaN, treating as 0.0");
        return Ok(0.0);
    }
    if !(0.0..=1.0).contains(&raw) {
        warn!(confidence = raw, "Confidence outside [0, 1], clamping");
    }
    Ok(raw.clamp(0.0, 1.0))
}

/// Visual tier for a confidence value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfidenceTier {
    Low,
    Mid,
    High,
}

impl ConfidenceTier {
    pub const LOW_BELOW: f64 = 0.6;
    pub const MID_BELOW: f64 = 0.85;

    /// `< 0.6` low, `< 0.85` mid, else high
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence < Self::LOW_BELOW {
            ConfidenceTier::Low
        } else if confidence < Self::MID_BELOW {
            ConfidenceTier::Mid
        } else {
            ConfidenceTier::High
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceTier::Low => "low",
            ConfidenceTier::Mid => "mid",
            ConfidenceTier::High => "high",
        }
    }
}

/// Aggregate session counters; `total = reviewed + remaining`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionProgress {
    pub total: u32,
    pub reviewed: u32,
    pub remaining: u32,
}

impl SessionProgress {
    /// Recompute counters from an item list
    pub fn from_items(items: &[QcItem]) -> Self {
        let reviewed = items.iter().filter(|i| i.is_reviewed()).count() as u32;
        let total = items.len() as u32;
        Self {
            total,
            reviewed,
            remaining: total - reviewed,
        }
    }

    pub fn is_consistent(&self) -> bool {
        self.reviewed.checked_add(self.remaining) == Some(self.total)
    }

    /// Reviewed share in percent, 0 for an empty session
    pub fn percent_reviewed(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        ((self.reviewed as f64 / self.total as f64) * 100.0).round() as u8
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionMeta {
    pub progress: SessionProgress,
}

/// Raw `GET /qc-sessions/{id}` body
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionResponse {
    pub items: Vec<QcItem>,
    pub meta: SessionMeta,
}

impl SessionResponse {
    /// Flatten into a [`Snapshot`], logging counter inconsistencies
    ///
    /// Backend counters are kept as-is: the backend is authoritative for
    /// progress even when they disagree with the item list.
    pub fn into_snapshot(self) -> Snapshot {
        let progress = self.meta.progress;
        if !progress.is_consistent() {
            warn!(
                total = progress.total,
                reviewed = progress.reviewed,
                remaining = progress.remaining,
                "Session progress violates total = reviewed + remaining"
            );
        }
        let derived = SessionProgress::from_items(&self.items);
        if derived != progress {
            warn!(
                ?derived,
                reported = ?progress,
                "Session progress disagrees with item statuses"
            );
        }
        Snapshot {
            items: self.items,
            progress,
        }
    }
}

/// Decoded session contents held by the store
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub items: Vec<QcItem>,
    pub progress: SessionProgress,
}

impl Snapshot {
    pub fn find(&self, item_id: ItemId) -> Option<&QcItem> {
        self.items.iter().find(|i| i.qc_item_id == item_id)
    }
}

/// `PATCH /qc-items/{id}` body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemUpdate {
    pub correct_sentiment: Sentiment,
    /// Always 1: the correction was confirmed by a human
    pub confirmed: u8,
}

impl ItemUpdate {
    pub fn confirmed(correct_sentiment: Sentiment) -> Self {
        Self {
            correct_sentiment,
            confirmed: 1,
        }
    }
}

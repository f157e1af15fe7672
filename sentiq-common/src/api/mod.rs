//! Typed wire boundary for the sentiment backend
//!
//! Every payload the backend returns is decoded into these types
//! immediately after the network call. Field-name and casing differences
//! between backend variants are absorbed here (serde aliases and
//! case-insensitive labels), never in rendering code.
//!
//! - [`qc`]: QC session snapshot and single-item update
//! - [`dashboard`]: batch metrics and review samples

pub mod dashboard;
pub mod qc;

use serde::{Deserialize, Serialize};

pub use dashboard::{AspectResult, BatchMetrics, Review, SentimentCounts};
pub use qc::{
    ConfidenceTier, ItemId, ItemUpdate, QcItem, QcStatus, SessionProgress, SessionResponse,
    Snapshot,
};

/// `{ "data": ... }` envelope used by the dashboard endpoints
///
/// A missing or `null` `data` field decodes as `None`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Envelope<T> {
    #[serde(default = "Option::default")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn into_inner(self) -> Option<T> {
        self.data
    }
}

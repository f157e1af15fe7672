//! Dashboard wire types
//!
//! Two backend variants exist. One sends overall counts as
//! `positive/negative/neutral` and aspect keys in uppercase (`TASTE`); the
//! other sends `pos/neg/neu` and lowercase keys. Both decode into the same
//! types here.

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::warn;

use crate::labels::{Aspect, Platform, Sentiment};

/// Positive/negative/neutral counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SentimentCounts {
    #[serde(default, alias = "pos")]
    pub positive: u64,
    #[serde(default, alias = "neg")]
    pub negative: u64,
    #[serde(default, alias = "neu")]
    pub neutral: u64,
}

impl SentimentCounts {
    pub fn total(&self) -> u64 {
        self.positive
            .saturating_add(self.negative)
            .saturating_add(self.neutral)
    }

    pub fn max(&self) -> u64 {
        self.positive.max(self.negative).max(self.neutral)
    }

    pub fn get(&self, sentiment: Sentiment) -> u64 {
        match sentiment {
            Sentiment::Positive => self.positive,
            Sentiment::Negative => self.negative,
            Sentiment::Neutral => self.neutral,
        }
    }

    fn merge(&mut self, other: &SentimentCounts) {
        self.positive = self.positive.saturating_add(other.positive);
        self.negative = self.negative.saturating_add(other.negative);
        self.neutral = self.neutral.saturating_add(other.neutral);
    }
}

/// `GET /batches/{id}/metrics` payload (inside the `data` envelope)
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct BatchMetrics {
    #[serde(default)]
    pub platform_counts: BTreeMap<Platform, u64>,

    #[serde(default, alias = "overall")]
    pub overall_sentiment: SentimentCounts,

    /// Per-aspect counts in backend order, keys normalized
    #[serde(default, deserialize_with = "ordered_aspects", alias = "aspects")]
    pub aspect_metrics: Vec<(Aspect, SentimentCounts)>,
}

/// Decode an aspect-keyed object into an ordered list
///
/// Keys differing only by case (`TASTE` and `taste`) are merged.
fn ordered_aspects<'de, D>(deserializer: D) -> Result<Vec<(Aspect, SentimentCounts)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct AspectMapVisitor;

    impl<'de> Visitor<'de> for AspectMapVisitor {
        type Value = Vec<(Aspect, SentimentCounts)>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("an object keyed by aspect name")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut out: Vec<(Aspect, SentimentCounts)> = Vec::new();
            while let Some((key, counts)) = map.next_entry::<String, SentimentCounts>()? {
                let aspect = Aspect::from(key);
                match out.iter_mut().find(|(a, _)| *a == aspect) {
                    Some((_, existing)) => existing.merge(&counts),
                    None => out.push((aspect, counts)),
                }
            }
            Ok(out)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(AspectMapVisitor)
}

/// Per-aspect classification of one review
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AspectResult {
    #[serde(deserialize_with = "lenient_sentiment")]
    pub sentiment: Sentiment,
}

/// Anything that is not positive or negative counts as neutral
fn lenient_sentiment<'de, D>(deserializer: D) -> Result<Sentiment, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
    Ok(raw.parse().unwrap_or_else(|_| {
        warn!(sentiment = %raw, "Unrecognized review sentiment, treating as neutral");
        Sentiment::Neutral
    }))
}

fn first_result_per_aspect<'de, D>(
    deserializer: D,
) -> Result<BTreeMap<Aspect, AspectResult>, D::Error>
where
    D: Deserializer<'de>,
{
    struct ResultMapVisitor;

    impl<'de> Visitor<'de> for ResultMapVisitor {
        type Value = BTreeMap<Aspect, AspectResult>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("an object keyed by aspect name")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut out = BTreeMap::new();
            while let Some((key, result)) = map.next_entry::<String, AspectResult>()? {
                let aspect = Aspect::from(key.as_str());
                if out.contains_key(&aspect) {
                    warn!(key = %key, "Duplicate aspect in review results, keeping the first");
                    continue;
                }
                out.insert(aspect, result);
            }
            Ok(out)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E> {
            Ok(BTreeMap::new())
        }
    }

    deserializer.deserialize_any(ResultMapVisitor)
}

/// `GET /batches/{id}/reviews` item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    #[serde(default)]
    pub review_date: Option<String>,

    #[serde(default, alias = "platform")]
    pub source_platform: Option<Platform>,

    #[serde(alias = "review_content")]
    pub content: String,

    /// Keys differing only by case keep the first entry
    #[serde(default, deserialize_with = "first_result_per_aspect")]
    pub results: BTreeMap<Aspect, AspectResult>,
}

impl Review {
    pub fn sentiment_for(&self, aspect: &Aspect) -> Option<Sentiment> {
        self.results.get(aspect).map(|r| r.sentiment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_long_keys_uppercase_aspects() {
        let json = r#"{
            "platform_counts": {"youtube": 120, "google": 30},
            "overall_sentiment": {"positive": 80, "negative": 40, "neutral": 30},
            "aspect_metrics": {
                "TASTE": {"positive": 50, "negative": 10, "neutral": 5},
                "PRICE": {"positive": 5, "negative": 20, "neutral": 8}
            }
        }"#;
        let metrics: BatchMetrics = serde_json::from_str(json).unwrap();

        assert_eq!(metrics.platform_counts[&Platform::Youtube], 120);
        assert_eq!(metrics.overall_sentiment.total(), 150);
        assert_eq!(metrics.aspect_metrics[0].0, Aspect::Taste);
        assert_eq!(metrics.aspect_metrics[1].0, Aspect::Price);
        assert_eq!(metrics.aspect_metrics[1].1.negative, 20);
    }

    #[test]
    fn test_metrics_short_keys_decode_identically() {
        let long: SentimentCounts =
            serde_json::from_str(r#"{"positive": 3, "negative": 2, "neutral": 1}"#).unwrap();
        let short: SentimentCounts =
            serde_json::from_str(r#"{"pos": 3, "neg": 2, "neu": 1}"#).unwrap();
        assert_eq!(long, short);
        assert_eq!(short.max(), 3);
        assert_eq!(short.get(Sentiment::Negative), 2);
    }

    #[test]
    fn test_aspect_keys_differing_in_case_merge() {
        let json = r#"{"aspect_metrics": {
            "TASTE": {"pos": 1, "neg": 0, "neu": 0},
            "taste": {"pos": 2, "neg": 1, "neu": 0}
        }}"#;
        let metrics: BatchMetrics = serde_json::from_str(json).unwrap();
        assert_eq!(metrics.aspect_metrics.len(), 1);
        assert_eq!(metrics.aspect_metrics[0].1, SentimentCounts { positive: 3, negative: 1, neutral: 0 });
    }

    #[test]
    fn test_review_duplicate_aspect_keeps_first() {
        let json = r#"{
            "content": "Mixed feelings",
            "results": {
                "Taste": {"sentiment": "positive"},
                "taste": {"sentiment": "negative"}
            }
        }"#;
        let review: Review = serde_json::from_str(json).unwrap();

        assert_eq!(review.results.len(), 1);
        assert_eq!(review.sentiment_for(&Aspect::Taste), Some(Sentiment::Positive));
    }

    #[test]
    fn test_review_null_results_is_empty() {
        let review: Review =
            serde_json::from_str(r#"{"content": "No analysis", "results": null}"#).unwrap();
        assert!(review.results.is_empty());
    }

    #[test]
    fn test_counts_saturate_on_extreme_values() {
        let json = format!(
            r#"{{"aspect_metrics": {{
                "TASTE": {{"pos": {max}, "neg": 1, "neu": 1}},
                "taste": {{"pos": 5, "neg": 0, "neu": 0}}
            }}}}"#,
            max = u64::MAX
        );
        let metrics: BatchMetrics = serde_json::from_str(&json).unwrap();
        let counts = metrics.aspect_metrics[0].1;

        assert_eq!(counts.positive, u64::MAX);
        assert_eq!(counts.total(), u64::MAX);
    }

    #[test]
    fn test_review_results_normalized() {
        let json = r#"{
            "review_date": "2024-03-05",
            "source_platform": "YouTube",
            "content": "Tasty but slow",
            "results": {
                "Taste": {"sentiment": "positive"},
                "service": {"sentiment": "negative"},
                "scent": {"sentiment": "mixed"}
            }
        }"#;
        let review: Review = serde_json::from_str(json).unwrap();

        assert_eq!(review.source_platform, Some(Platform::Youtube));
        assert_eq!(review.sentiment_for(&Aspect::Taste), Some(Sentiment::Positive));
        assert_eq!(review.sentiment_for(&Aspect::Service), Some(Sentiment::Negative));
        assert_eq!(
            review.sentiment_for(&Aspect::Other("scent".to_string())),
            Some(Sentiment::Neutral)
        );
        assert_eq!(review.sentiment_for(&Aspect::Price), None);
    }
}

//! Review table rows
//!
//! One row per sampled review with a fixed badge column per known aspect.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use sentiq_common::api::Review;
use sentiq_common::{Aspect, Platform};

/// Cell text for an aspect the review has no result for
pub const EMPTY_BADGE: &str = "-";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRow {
    pub date: String,
    pub platform: Option<Platform>,
    pub content: String,
    /// One cell per [`Aspect::KNOWN`], in that order
    pub badges: Vec<String>,
}

impl ReviewRow {
    pub fn from_review(review: &Review) -> Self {
        let badges = Aspect::KNOWN
            .iter()
            .map(|aspect| {
                review
                    .sentiment_for(aspect)
                    .map(|s| s.badge().to_string())
                    .unwrap_or_else(|| EMPTY_BADGE.to_string())
            })
            .collect();

        Self {
            date: format_review_date(review.review_date.as_deref()),
            platform: review.source_platform.clone(),
            content: review.content.clone(),
            badges,
        }
    }
}

pub fn review_rows(reviews: &[Review]) -> Vec<ReviewRow> {
    reviews.iter().map(ReviewRow::from_review).collect()
}

/// Short en-GB date, e.g. `2024-03-05` -> `5 Mar 24`
///
/// Accepts plain dates, naive timestamps and RFC 3339. Anything else is
/// returned verbatim.
pub fn format_review_date(raw: Option<&str>) -> String {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return EMPTY_BADGE.to_string();
    };

    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        });

    match date {
        Some(date) => date.format("%-d %b %y").to_string(),
        None => raw.to_string(),
    }
}

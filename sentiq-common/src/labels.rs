//! Categorical labels: sentiment, aspect and source platform
//!
//! The backend is not consistent about casing (`TASTE` vs `taste`) or about
//! long vs short sentiment names (`positive` vs `pos`). Every label parses
//! case-insensitively here, so the rest of the code only sees normalized
//! values.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Sentiment label produced by the classifier or chosen by a reviewer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// Fixed selection set, in display order
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral];

    /// Wire name (`positive`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }

    /// Short code (`pos`)
    pub fn code(&self) -> &'static str {
        match self {
            Sentiment::Positive => "pos",
            Sentiment::Negative => "neg",
            Sentiment::Neutral => "neu",
        }
    }

    /// Capitalized label (`Positive`)
    pub fn label(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
        }
    }

    /// Capitalized short code (`Pos`)
    pub fn badge(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Pos",
            Sentiment::Negative => "Neg",
            Sentiment::Neutral => "Neu",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "positive" | "pos" => Ok(Sentiment::Positive),
            "negative" | "neg" => Ok(Sentiment::Negative),
            "neutral" | "neu" => Ok(Sentiment::Neutral),
            "" => Err(Error::Validation("sentiment is empty".to_string())),
            other => Err(Error::Validation(format!(
                "unknown sentiment '{}' (expected positive, negative or neutral)",
                other
            ))),
        }
    }
}

impl TryFrom<String> for Sentiment {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Review facet that is sentiment-scored independently
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Aspect {
    Taste,
    Price,
    Service,
    Atmosphere,
    Accessibility,
    /// Any label outside the fixed set, stored lowercase
    Other(String),
}

impl Aspect {
    /// Known aspects, in the column order of the review table
    pub const KNOWN: [Aspect; 5] = [
        Aspect::Taste,
        Aspect::Price,
        Aspect::Service,
        Aspect::Atmosphere,
        Aspect::Accessibility,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Aspect::Taste => "taste",
            Aspect::Price => "price",
            Aspect::Service => "service",
            Aspect::Atmosphere => "atmosphere",
            Aspect::Accessibility => "accessibility",
            Aspect::Other(name) => name,
        }
    }

    /// Title-cased name: `TASTE` and `taste` both become `Taste`
    pub fn title(&self) -> String {
        capitalize(self.as_str())
    }
}

impl From<&str> for Aspect {
    fn from(value: &str) -> Self {
        let lower = value.trim().to_ascii_lowercase();
        match lower.as_str() {
            "taste" => Aspect::Taste,
            "price" => Aspect::Price,
            "service" => Aspect::Service,
            "atmosphere" => Aspect::Atmosphere,
            "accessibility" => Aspect::Accessibility,
            _ => Aspect::Other(lower),
        }
    }
}

impl From<String> for Aspect {
    fn from(value: String) -> Self {
        Aspect::from(value.as_str())
    }
}

impl From<Aspect> for String {
    fn from(value: Aspect) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Aspect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source platform a review was collected from
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Platform {
    Youtube,
    Tiktok,
    Google,
    Facebook,
    Shopee,
    Other(String),
}

impl Platform {
    /// Platforms with a dedicated counter on the dashboard
    pub const COUNTED: [Platform; 3] = [Platform::Youtube, Platform::Tiktok, Platform::Google];

    pub fn as_str(&self) -> &str {
        match self {
            Platform::Youtube => "youtube",
            Platform::Tiktok => "tiktok",
            Platform::Google => "google",
            Platform::Facebook => "facebook",
            Platform::Shopee => "shopee",
            Platform::Other(name) => name,
        }
    }

    pub fn title(&self) -> String {
        match self {
            Platform::Youtube => "YouTube".to_string(),
            Platform::Tiktok => "TikTok".to_string(),
            other => capitalize(other.as_str()),
        }
    }
}

impl From<&str> for Platform {
    fn from(value: &str) -> Self {
        let lower = value.trim().to_ascii_lowercase();
        match lower.as_str() {
            "youtube" => Platform::Youtube,
            "tiktok" => Platform::Tiktok,
            "google" => Platform::Google,
            "facebook" => Platform::Facebook,
            "shopee" => Platform::Shopee,
            _ => Platform::Other(lower),
        }
    }
}

impl From<String> for Platform {
    fn from(value: String) -> Self {
        Platform::from(value.as_str())
    }
}

impl From<Platform> for String {
    fn from(value: Platform) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Uppercase the first character, lowercase the rest
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

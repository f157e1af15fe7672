//! # Sentiq Common Library
//!
//! Shared code for the sentiq front ends:
//! - Error taxonomy (network, validation, not-found)
//! - Configuration resolution (CLI > ENV > TOML > defaults)
//! - Sentiment, aspect and platform labels
//! - Typed wire boundary for the QC and dashboard APIs
//! - Event bus for store/controller notifications

pub mod api;
pub mod config;
pub mod error;
pub mod events;
pub mod labels;

pub use error::{Error, Result};
pub use labels::{Aspect, Platform, Sentiment};

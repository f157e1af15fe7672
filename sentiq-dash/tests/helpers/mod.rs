//! Test helpers for sentiq-dash integration tests

#![allow(dead_code)]

pub mod fake_backend;

pub use fake_backend::FakeDashboard;

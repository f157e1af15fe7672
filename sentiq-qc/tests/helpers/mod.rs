//! Test helper modules for sentiq-qc integration tests
//!
//! Provides reusable test infrastructure components:
//! - FakeBackend: in-process QC API on an ephemeral port
//! - fake_backend::session_fixture: 10 items, 3 reviewed, 7 pending

#![allow(dead_code)]

pub mod fake_backend;

pub use fake_backend::{FakeBackend, SESSION_ID};

use sentiq_common::events::EventBus;
use sentiq_qc::{AuditController, QcClient, QcStore};
use std::time::Duration;

/// Controller wired to `backend`, plus its event bus
pub fn controller_for(backend: &FakeBackend) -> (AuditController, EventBus) {
    let client = QcClient::new(backend.api_url.clone(), Duration::from_secs(5))
        .expect("Should build QC client");
    let events = EventBus::new(32);
    let store = QcStore::new(client, events.clone());
    (AuditController::new(store), events)
}

//! sentiq-qc library - QC review workflow
//!
//! A human audits AI-predicted sentiment labels one item at a time:
//! - [`client`]: fetch-session / update-item sync protocol
//! - [`store`]: client-side cache of the open session, reloaded after every write
//! - [`audit`]: the audit modal state machine
//! - [`view`] and [`shell`]: terminal front end

pub mod audit;
pub mod client;
pub mod shell;
pub mod store;
pub mod view;

pub use audit::{AuditController, AuditOutcome, ModalState};
pub use client::QcClient;
pub use store::QcStore;

use sentiq_common::config::ClientConfig;
use sentiq_common::events::EventBus;
use sentiq_common::Result;

/// Wire a controller for `config` with a fresh store
pub fn build_controller(config: &ClientConfig, events: EventBus) -> Result<AuditController> {
    let client = QcClient::from_config(config)?;
    Ok(AuditController::new(QcStore::new(client, events)))
}

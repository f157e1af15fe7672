//! Audit Modal Controller
//!
//! Single-item editing surface: `Closed -> Open(item) -> Closed`.
//!
//! The controller owns the [`QcStore`]. `submit` borrows the controller
//! mutably for the whole write-then-reload round trip, so a second audit
//! cannot be opened against a snapshot that is about to be replaced.

use sentiq_common::api::{ItemId, ItemUpdate, QcItem, SessionProgress};
use sentiq_common::events::QcEvent;
use sentiq_common::{Error, Result, Sentiment};
use tracing::{error, info, warn};

use crate::store::QcStore;

/// Modal state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalState {
    Closed,
    Open {
        item_id: ItemId,
        /// Pending human choice; `None` after the user clears it
        selection: Option<Sentiment>,
    },
}

/// Result of a submit whose write reached the backend
#[derive(Debug)]
pub enum AuditOutcome {
    /// Written and reloaded; `progress` is the server-computed value
    Saved {
        item_id: ItemId,
        sentiment: Sentiment,
        progress: SessionProgress,
    },
    /// Written, but the follow-up reload failed and the store is stale
    SavedButStale {
        item_id: ItemId,
        sentiment: Sentiment,
        reload_error: Error,
    },
}

impl AuditOutcome {
    pub fn item_id(&self) -> ItemId {
        match self {
            AuditOutcome::Saved { item_id, .. } | AuditOutcome::SavedButStale { item_id, .. } => {
                *item_id
            }
        }
    }
}

pub struct AuditController {
    store: QcStore,
    state: ModalState,
    write_in_flight: bool,
}

impl AuditController {
    pub fn new(store: QcStore) -> Self {
        Self {
            store,
            state: ModalState::Closed,
            write_in_flight: false,
        }
    }

    pub fn store(&self) -> &QcStore {
        &self.store
    }

    pub fn state(&self) -> ModalState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, ModalState::Open { .. })
    }

    /// Item the modal is bound to, if open and still in the snapshot
    pub fn current_item(&self) -> Option<&QcItem> {
        match self.state {
            ModalState::Open { item_id, .. } => self.store.find(item_id),
            ModalState::Closed => None,
        }
    }

    /// Load a session into the owned store
    pub async fn load(&mut self, session_id: u64) -> Result<SessionProgress> {
        let snapshot = self.store.load(session_id).await?;
        let progress = snapshot.progress;
        self.after_reload();
        Ok(progress)
    }

    /// Reload the current session
    ///
    /// Also the way out after an interrupted submit: a successful reload
    /// clears the in-flight guard.
    pub async fn reload(&mut self) -> Result<SessionProgress> {
        let snapshot = self.store.refresh().await?;
        let progress = snapshot.progress;
        self.after_reload();
        Ok(progress)
    }

    fn after_reload(&mut self) {
        self.write_in_flight = false;
        if let ModalState::Open { item_id, .. } = self.state {
            if self.store.find(item_id).is_none() {
                warn!(item_id, "Audited item vanished after reload, closing modal");
                self.state = ModalState::Closed;
            }
        }
    }

    /// Bind the modal to `item_id`, defaulting the selection to the prediction
    ///
    /// Unknown ids leave the state untouched and return [`Error::NotFound`].
    pub fn open(&mut self, item_id: ItemId) -> Result<&QcItem> {
        if self.write_in_flight {
            warn!(item_id, "Audit blocked: previous write did not complete");
            return Err(Error::Busy(
                "a previous correction did not complete; reload before auditing".to_string(),
            ));
        }

        let Some(item) = self.store.find(item_id) else {
            warn!(item_id, "Audit requested for item not in current snapshot");
            return Err(Error::NotFound(format!("QC item #{}", item_id)));
        };

        self.state = ModalState::Open {
            item_id,
            selection: Some(item.predicted_sentiment),
        };
        info!(item_id, predicted = %item.predicted_sentiment, "Audit modal opened");
        Ok(item)
    }

    pub fn select(&mut self, sentiment: Sentiment) -> Result<()> {
        match &mut self.state {
            ModalState::Open { selection, .. } => {
                *selection = Some(sentiment);
                Ok(())
            }
            ModalState::Closed => Err(Error::InvalidState("audit modal is not open".to_string())),
        }
    }

    pub fn clear_selection(&mut self) -> Result<()> {
        match &mut self.state {
            ModalState::Open { selection, .. } => {
                *selection = None;
                Ok(())
            }
            ModalState::Closed => Err(Error::InvalidState("audit modal is not open".to_string())),
        }
    }

    /// Close without sending anything
    pub fn cancel(&mut self) {
        self.state = ModalState::Closed;
    }

    /// Send the selection, then reload the whole session
    ///
    /// - No selection: [`Error::Validation`], nothing is sent.
    /// - Write fails: the error is returned, the modal stays open with its
    ///   selection and the store is untouched.
    /// - Write succeeds: the modal closes and the store reloads. A failed
    ///   reload is reported through [`AuditOutcome::SavedButStale`].
    pub async fn submit(&mut self) -> Result<AuditOutcome> {
        let (item_id, selection) = match self.state {
            ModalState::Open { item_id, selection } => (item_id, selection),
            ModalState::Closed => {
                return Err(Error::InvalidState("audit modal is not open".to_string()));
            }
        };

        let Some(sentiment) = selection else {
            warn!(item_id, "Submit rejected: no sentiment selected");
            return Err(Error::Validation("Please select a sentiment".to_string()));
        };

        self.write_in_flight = true;
        let update = ItemUpdate::confirmed(sentiment);
        if let Err(e) = self.store.client().update_item(item_id, &update).await {
            self.write_in_flight = false;
            error!(item_id, "Error saving correction: {}", e);
            return Err(e);
        }

        self.store.events().emit_lossy(QcEvent::ItemCorrected {
            item_id,
            sentiment,
            timestamp: chrono::Utc::now(),
        });
        self.state = ModalState::Closed;

        let reload = self.store.refresh().await.map(|snapshot| snapshot.progress);
        let outcome = match reload {
            Ok(progress) => AuditOutcome::Saved {
                item_id,
                sentiment,
                progress,
            },
            Err(reload_error) => {
                self.store.mark_stale();
                AuditOutcome::SavedButStale {
                    item_id,
                    sentiment,
                    reload_error,
                }
            }
        };
        self.write_in_flight = false;
        Ok(outcome)
    }
}

//! QC Item Store
//!
//! Client-side cache of the currently open QC session. The backend is the
//! source of truth: the store never patches items locally, it only replaces
//! its snapshot wholesale on a successful load.

use sentiq_common::api::{ItemId, QcItem, SessionProgress, Snapshot};
use sentiq_common::events::{EventBus, QcEvent};
use sentiq_common::{Error, Result};
use tracing::{error, warn};

use crate::client::QcClient;

pub struct QcStore {
    client: QcClient,
    events: EventBus,
    /// Session of the held snapshot
    loaded_session: Option<u64>,
    /// Most recent `load` argument, successful or not
    requested_session: Option<u64>,
    snapshot: Option<Snapshot>,
    stale: bool,
}

impl QcStore {
    pub fn new(client: QcClient, events: EventBus) -> Self {
        Self {
            client,
            events,
            loaded_session: None,
            requested_session: None,
            snapshot: None,
            stale: false,
        }
    }

    /// Fetch `session_id` and replace the snapshot
    ///
    /// On failure the previous snapshot (if any) stays in place and the
    /// error is returned unchanged; there is no retry.
    pub async fn load(&mut self, session_id: u64) -> Result<&Snapshot> {
        self.requested_session = Some(session_id);
        let result = self.client.fetch_session(session_id).await;
        match result {
            Ok(snapshot) => {
                self.events.emit_lossy(QcEvent::SessionLoaded {
                    session_id,
                    progress: snapshot.progress,
                    timestamp: chrono::Utc::now(),
                });
                self.stale = false;
                self.loaded_session = Some(session_id);
                Ok(self.snapshot.insert(snapshot))
            }
            Err(e) => {
                error!(session_id, "Failed to load QC items: {}", e);
                self.events.emit_lossy(QcEvent::LoadFailed {
                    session_id,
                    message: e.to_string(),
                    timestamp: chrono::Utc::now(),
                });
                Err(e)
            }
        }
    }

    /// Reload the session the held snapshot came from
    ///
    /// Before any successful load this retries the last requested session,
    /// so a failed initial load can be recovered.
    pub async fn refresh(&mut self) -> Result<&Snapshot> {
        let session_id = self
            .session_id()
            .ok_or_else(|| Error::NotFound("no QC session requested yet".to_string()))?;
        self.load(session_id).await
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    pub fn items(&self) -> &[QcItem] {
        self.snapshot.as_ref().map(|s| s.items.as_slice()).unwrap_or(&[])
    }

    pub fn find(&self, item_id: ItemId) -> Option<&QcItem> {
        self.snapshot.as_ref().and_then(|s| s.find(item_id))
    }

    pub fn progress(&self) -> Option<SessionProgress> {
        self.snapshot.as_ref().map(|s| s.progress)
    }

    /// Session [`refresh`](Self::refresh) targets: the displayed one, else
    /// the last requested one
    pub fn session_id(&self) -> Option<u64> {
        self.loaded_session.or(self.requested_session)
    }

    pub fn requested_session(&self) -> Option<u64> {
        self.requested_session
    }

    /// True when a write succeeded but the follow-up reload did not
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    pub(crate) fn mark_stale(&mut self) {
        warn!(session_id = ?self.loaded_session, "QC snapshot is stale until the next successful load");
        self.stale = true;
    }

    pub(crate) fn client(&self) -> &QcClient {
        &self.client
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }
}

//! Event types and EventBus
//!
//! The QC store and audit controller announce state changes here so a
//! front end can redraw without polling. Emission never fails the
//! operation that produced the event.

use serde::Serialize;
use tokio::sync::broadcast;

use crate::api::{ItemId, SessionProgress};
use crate::labels::Sentiment;

/// Notifications emitted by the QC workflow
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum QcEvent {
    /// A session snapshot replaced the previous one
    SessionLoaded {
        session_id: u64,
        progress: SessionProgress,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// A session load failed; the previous snapshot is still displayed
    LoadFailed {
        session_id: u64,
        message: String,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// The backend accepted a human correction
    ItemCorrected {
        item_id: ItemId,
        sentiment: Sentiment,
        timestamp: chrono::DateTime<chrono::Utc>,
    },
}

/// Broadcast channel for [`QcEvent`]s
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<QcEvent>,
}

impl EventBus {
    /// Creates a new EventBus buffering up to `capacity` events per subscriber
    ///
    /// # Examples
    ///
    /// ```
    /// use sentiq_common::events::EventBus;
    ///
    /// let event_bus = EventBus::new(100);
    /// let mut rx = event_bus.subscribe();
    /// assert!(rx.try_recv().is_err());
    /// ```
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Subscribe to all future events
    pub fn subscribe(&self) -> broadcast::Receiver<QcEvent> {
        self.tx.subscribe()
    }

    /// Emit an event, ignoring if no subscribers are listening
    pub fn emit_lossy(&self, event: QcEvent) {
        let _ = self.tx.send(event);
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscriber_receives_event() {
        let bus = EventBus::new(8);
        let mut rx = bus.subscribe();

        bus.emit_lossy(QcEvent::ItemCorrected {
            item_id: 7,
            sentiment: Sentiment::Negative,
            timestamp: chrono::Utc::now(),
        });

        match rx.recv().await.unwrap() {
            QcEvent::ItemCorrected { item_id, sentiment, .. } => {
                assert_eq!(item_id, 7);
                assert_eq!(sentiment, Sentiment::Negative);
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_emit_without_subscribers_is_silent() {
        let bus = EventBus::default();
        bus.emit_lossy(QcEvent::LoadFailed {
            session_id: 1,
            message: "offline".to_string(),
            timestamp: chrono::Utc::now(),
        });
    }

    #[test]
    fn test_event_serializes_with_tag() {
        let json = serde_json::to_value(QcEvent::SessionLoaded {
            session_id: 55,
            progress: SessionProgress { total: 10, reviewed: 3, remaining: 7 },
            timestamp: chrono::Utc::now(),
        })
        .unwrap();
        assert_eq!(json["type"], "SessionLoaded");
        assert_eq!(json["progress"]["remaining"], 7);
    }
}

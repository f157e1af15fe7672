//! In-process fake of the QC backend
//!
//! Serves `GET /api/qc-sessions/:id` and `PATCH /api/qc-items/:id` from
//! memory. Like the real backend it recomputes status and progress itself,
//! so tests observe server-side effects only through a reload.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch},
    Json, Router,
};
use sentiq_common::api::{ItemUpdate, QcItem, QcStatus, SessionProgress};
use sentiq_common::{Aspect, Sentiment};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const SESSION_ID: u64 = 55;

#[derive(Default)]
pub struct FakeState {
    pub sessions: HashMap<u64, Vec<QcItem>>,
    pub fetch_count: usize,
    pub patch_count: usize,
    pub last_patch_body: Option<Value>,
    /// Next PATCH answers 500 without applying anything
    pub fail_next_patch: bool,
    /// Every GET answers 503
    pub fail_fetches: bool,
    /// Next successful PATCH switches `fail_fetches` on
    pub fail_fetches_after_patch: bool,
    /// Served verbatim instead of the stored session
    pub raw_session_body: Option<String>,
    /// PATCH handlers sleep this long before answering
    pub patch_delay: Option<Duration>,
}

type Shared = Arc<Mutex<FakeState>>;

pub struct FakeBackend {
    pub api_url: String,
    state: Shared,
}

impl FakeBackend {
    /// Start serving `sessions` on 127.0.0.1 with an ephemeral port
    pub async fn start(sessions: HashMap<u64, Vec<QcItem>>) -> Self {
        let state: Shared = Arc::new(Mutex::new(FakeState {
            sessions,
            ..Default::default()
        }));

        let app = Router::new()
            .route("/api/qc-sessions/:id", get(get_session))
            .route("/api/qc-items/:id", patch(patch_item))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Should bind fake backend");
        let addr = listener.local_addr().expect("Should have local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Fake backend crashed");
        });

        Self {
            api_url: format!("http://{}/api", addr),
            state,
        }
    }

    /// Backend holding [`session_fixture`] as session [`SESSION_ID`]
    pub async fn with_fixture() -> Self {
        Self::start(HashMap::from([(SESSION_ID, session_fixture())])).await
    }

    pub fn fetch_count(&self) -> usize {
        self.state.lock().unwrap().fetch_count
    }

    pub fn patch_count(&self) -> usize {
        self.state.lock().unwrap().patch_count
    }

    pub fn last_patch_body(&self) -> Option<Value> {
        self.state.lock().unwrap().last_patch_body.clone()
    }

    pub fn fail_next_patch(&self) {
        self.state.lock().unwrap().fail_next_patch = true;
    }

    pub fn set_fail_fetches(&self, fail: bool) {
        self.state.lock().unwrap().fail_fetches = fail;
    }

    pub fn fail_fetches_after_patch(&self) {
        self.state.lock().unwrap().fail_fetches_after_patch = true;
    }

    pub fn set_raw_session_body(&self, body: &str) {
        self.state.lock().unwrap().raw_session_body = Some(body.to_string());
    }

    pub fn set_patch_delay(&self, delay: Duration) {
        self.state.lock().unwrap().patch_delay = Some(delay);
    }

    /// Server-side copy of an item
    pub fn item(&self, item_id: u64) -> Option<QcItem> {
        let state = self.state.lock().unwrap();
        state
            .sessions
            .values()
            .flatten()
            .find(|i| i.qc_item_id == item_id)
            .cloned()
    }
}

async fn get_session(State(state): State<Shared>, Path(session_id): Path<u64>) -> Response {
    let mut guard = state.lock().unwrap();
    let s = &mut *guard;
    s.fetch_count += 1;

    if s.fail_fetches {
        return (StatusCode::SERVICE_UNAVAILABLE, "backend unavailable").into_response();
    }
    if let Some(raw) = &s.raw_session_body {
        return (
            StatusCode::OK,
            [("content-type", "application/json")],
            raw.clone(),
        )
            .into_response();
    }

    match s.sessions.get(&session_id) {
        Some(items) => Json(json!({
            "items": items,
            "meta": { "progress": SessionProgress::from_items(items) }
        }))
        .into_response(),
        None => (StatusCode::NOT_FOUND, "QC session not found").into_response(),
    }
}

async fn patch_item(
    State(state): State<Shared>,
    Path(item_id): Path<u64>,
    Json(body): Json<Value>,
) -> Response {
    let delay = state.lock().unwrap().patch_delay;
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }

    let mut guard = state.lock().unwrap();
    let s = &mut *guard;
    s.patch_count += 1;
    s.last_patch_body = Some(body.clone());

    if s.fail_next_patch {
        s.fail_next_patch = false;
        return (StatusCode::INTERNAL_SERVER_ERROR, "update failed").into_response();
    }

    let update: ItemUpdate = match serde_json::from_value(body) {
        Ok(update) => update,
        Err(e) => return (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()).into_response(),
    };

    let Some(item) = s
        .sessions
        .values_mut()
        .flatten()
        .find(|i| i.qc_item_id == item_id)
    else {
        return (StatusCode::NOT_FOUND, "QC item not found").into_response();
    };

    item.correct_sentiment = Some(update.correct_sentiment);
    if update.confirmed == 1 {
        item.status = QcStatus::Reviewed;
    }

    if s.fail_fetches_after_patch {
        s.fail_fetches_after_patch = false;
        s.fail_fetches = true;
    }

    Json(json!({ "success": true })).into_response()
}

/// 10 items: #101-#103 reviewed, #104-#110 pending
pub fn session_fixture() -> Vec<QcItem> {
    let rows: [(&str, &str, Sentiment, f64); 10] = [
        ("The broth is rich and deep", "taste", Sentiment::Positive, 0.95),
        ("Way too expensive for the portion", "price", Sentiment::Negative, 0.91),
        ("Staff were okay", "service", Sentiment::Neutral, 0.62),
        ("Loud music, hard to talk", "atmosphere", Sentiment::Negative, 0.55),
        ("Ramp at the entrance, easy with a stroller", "accessibility", Sentiment::Positive, 0.88),
        ("Noodles a bit soggy", "taste", Sentiment::Negative, 0.75),
        ("Fair price", "price", Sentiment::Positive, 0.58),
        ("Waiter forgot our drinks", "service", Sentiment::Negative, 0.97),
        ("Cozy lighting", "atmosphere", Sentiment::Positive, 0.83),
        ("Parking is a nightmare", "accessibility", Sentiment::Negative, 0.69),
    ];

    rows.iter()
        .enumerate()
        .map(|(i, (content, aspect, predicted, confidence))| QcItem {
            qc_item_id: 101 + i as u64,
            review_content: content.to_string(),
            aspect: Aspect::from(*aspect),
            predicted_sentiment: *predicted,
            confidence: *confidence,
            status: if i < 3 { QcStatus::Reviewed } else { QcStatus::Pending },
            correct_sentiment: if i < 3 { Some(*predicted) } else { None },
        })
        .collect()
}

//! In-process fake of the dashboard endpoints
//!
//! Serves canned JSON bodies for one batch and records the query string
//! of every request.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub const BATCH_ID: &str = "55";

#[derive(Default)]
struct FakeState {
    metrics_body: String,
    reviews_body: String,
    status: Option<StatusCode>,
    last_query: Option<(String, HashMap<String, String>)>,
}

type Shared = Arc<Mutex<FakeState>>;

pub struct FakeDashboard {
    pub api_url: String,
    state: Shared,
}

impl FakeDashboard {
    pub async fn start(metrics_body: &str, reviews_body: &str) -> Self {
        let state: Shared = Arc::new(Mutex::new(FakeState {
            metrics_body: metrics_body.to_string(),
            reviews_body: reviews_body.to_string(),
            ..Default::default()
        }));

        let app = Router::new()
            .route("/api/batches/:batch/:resource", get(batch_resource))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Should bind fake dashboard");
        let addr = listener.local_addr().expect("Should have local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Fake dashboard crashed");
        });

        Self {
            api_url: format!("http://{}/api", addr),
            state,
        }
    }

    /// Answer every request with `status` and a plain-text body
    pub fn fail_with(&self, status: StatusCode) {
        self.state.lock().unwrap().status = Some(status);
    }

    /// Resource name and query parameters of the latest request
    pub fn last_query(&self) -> Option<(String, HashMap<String, String>)> {
        self.state.lock().unwrap().last_query.clone()
    }
}

async fn batch_resource(
    State(state): State<Shared>,
    Path((batch, resource)): Path<(String, String)>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let mut state = state.lock().unwrap();
    state.last_query = Some((resource.clone(), params));

    if let Some(status) = state.status {
        return (status, "dashboard unavailable").into_response();
    }
    if batch != BATCH_ID {
        return (StatusCode::NOT_FOUND, "batch not found").into_response();
    }

    let body = match resource.as_str() {
        "metrics" => state.metrics_body.clone(),
        "reviews" => state.reviews_body.clone(),
        _ => return StatusCode::NOT_FOUND.into_response(),
    };
    (StatusCode::OK, [("content-type", "application/json")], body).into_response()
}

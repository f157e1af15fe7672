//! QC sync protocol client
//!
//! Two operations only:
//! - `GET  {api}/qc-sessions/{session_id}`: full snapshot, idempotent
//! - `PATCH {api}/qc-items/{item_id}`: single-item correction
//!
//! No retries: every failure is returned to the caller, which decides
//! whether the user should try again.

use reqwest::Response;
use sentiq_common::api::{ItemId, ItemUpdate, SessionResponse, Snapshot};
use sentiq_common::config::ClientConfig;
use sentiq_common::{Error, Result};
use std::time::Duration;
use tracing::{debug, info};

const USER_AGENT: &str = concat!("sentiq-qc/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the QC endpoints
#[derive(Debug, Clone)]
pub struct QcClient {
    http_client: reqwest::Client,
    api_url: String,
}

impl QcClient {
    /// Build a client for `api_url` (no trailing slash)
    pub fn new(api_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::new(config.api_url.clone(), config.request_timeout)
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Fetch the full item list and progress for a session
    pub async fn fetch_session(&self, session_id: u64) -> Result<Snapshot> {
        let url = format!("{}/qc-sessions/{}", self.api_url, session_id);
        debug!(session_id, url = %url, "Fetching QC session");

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(network_error)?;
        let response = ensure_success(response).await?;

        let body: SessionResponse = response
            .json()
            .await
            .map_err(|e| Error::Decode(e.to_string()))?;
        let snapshot = body.into_snapshot();

        info!(
            session_id,
            items = snapshot.items.len(),
            reviewed = snapshot.progress.reviewed,
            remaining = snapshot.progress.remaining,
            "Loaded QC session"
        );
        Ok(snapshot)
    }

    /// Send one confirmed correction; the response body is ignored
    pub async fn update_item(&self, item_id: ItemId, update: &ItemUpdate) -> Result<()> {
        let url = format!("{}/qc-items/{}", self.api_url, item_id);
        debug!(
            item_id,
            sentiment = %update.correct_sentiment,
            url = %url,
            "Submitting QC correction"
        );

        let response = self
            .http_client
            .patch(&url)
            .json(update)
            .send()
            .await
            .map_err(network_error)?;
        ensure_success(response).await?;

        info!(item_id, sentiment = %update.correct_sentiment, "QC correction accepted");
        Ok(())
    }
}

fn network_error(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::Network(format!("request timed out: {}", e))
    } else {
        Error::Network(e.to_string())
    }
}

/// Map any non-2xx status to [`Error::Http`]
async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(Error::Http {
        status: status.as_u16(),
        body: if body.is_empty() {
            status.canonical_reason().unwrap_or("unknown status").to_string()
        } else {
            body
        },
    })
}

//! Dashboard API client
//!
//! Read-only access to batch metrics and review samples. Both endpoints
//! wrap their payload in `{ "data": ... }`; a null or missing `data` is
//! treated as an empty result.

use reqwest::Response;
use sentiq_common::api::{BatchMetrics, Envelope, Review};
use sentiq_common::config::ClientConfig;
use sentiq_common::{Error, Result};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::query::{MetricsQuery, ReviewQuery};

const USER_AGENT: &str = concat!("sentiq-dash/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct DashboardClient {
    http_client: reqwest::Client,
    api_url: String,
    batch_id: String,
}

impl DashboardClient {
    pub fn new(
        api_url: impl Into<String>,
        batch_id: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            batch_id: batch_id.into(),
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::new(
            config.api_url.clone(),
            config.batch_id.clone(),
            config.request_timeout,
        )
    }

    pub fn batch_id(&self) -> &str {
        &self.batch_id
    }

    /// Aggregated metrics for the batch; empty when the backend has none
    pub async fn get_metrics(&self, query: &MetricsQuery) -> Result<BatchMetrics> {
        let metrics: Option<BatchMetrics> = self.get_data("metrics", &query.params()).await?;
        let metrics = metrics.unwrap_or_else(|| {
            warn!(batch_id = %self.batch_id, "Metrics response carried no data");
            BatchMetrics::default()
        });

        info!(
            batch_id = %self.batch_id,
            platforms = metrics.platform_counts.len(),
            aspects = metrics.aspect_metrics.len(),
            "Loaded batch metrics"
        );
        Ok(metrics)
    }

    /// Random sample of analyzed reviews
    pub async fn get_reviews(&self, query: &ReviewQuery) -> Result<Vec<Review>> {
        let reviews: Option<Vec<Review>> = self.get_data("reviews", &query.params()).await?;
        let reviews = reviews.unwrap_or_default();
        info!(batch_id = %self.batch_id, count = reviews.len(), "Loaded review sample");
        Ok(reviews)
    }

    async fn get_data<T: DeserializeOwned>(
        &self,
        resource: &str,
        params: &[(&'static str, String)],
    ) -> Result<Option<T>> {
        let url = format!("{}/batches/{}/{}", self.api_url, self.batch_id, resource);
        debug!(url = %url, ?params, "Fetching dashboard data");

        let response = self
            .http_client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::Network(format!("request timed out: {}", e))
                } else {
                    Error::Network(e.to_string())
                }
            })?;
        let response = ensure_success(response).await?;

        let envelope: Envelope<T> = response
            .json()
            .await
            .map_err(|e| Error::Decode(format!("{} response: {}", resource, e)))?;
        Ok(envelope.into_inner())
    }
}

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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_keeps_batch_and_trims_url() {
        let client =
            DashboardClient::new("http://localhost:8000/api/", "55", Duration::from_secs(5))
                .unwrap();
        assert_eq!(client.batch_id(), "55");
        assert_eq!(client.api_url, "http://localhost:8000/api");
    }
}

//! HTTP(S) fetches via an async reqwest client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::ImageSource;
use crate::error::{PlacementError, PlacementResult};

#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    /// Build a client whose every request is bounded by `timeout`.
    pub fn new(timeout: Duration) -> PlacementResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PlacementError::external("reqwest", e).with_operation("build_http_client"))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ImageSource for HttpSource {
    async fn fetch(&self, reference: &str) -> PlacementResult<Vec<u8>> {
        debug!(url = reference, "Fetching over HTTP");
        let response = self.client.get(reference).send().await.map_err(|e| {
            let reason = if e.is_timeout() { "request timed out" } else { "request failed" };
            PlacementError::fetch_with_source(reference, reason, e)
                .with_recovery_suggestion("Check that the URL is reachable")
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(PlacementError::fetch(reference, format!("HTTP status {}", status))
                .with_metadata("status", status.as_u16().to_string()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| PlacementError::fetch_with_source(reference, "reading body failed", e))?;
        debug!(url = reference, len = bytes.len(), "Fetched");
        Ok(bytes.to_vec())
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

//! HTTP resource fetcher.
//!
//! Issues one GET per resource against the proxy API, with a per-request
//! timeout and no retries.

use crate::error::FetchError;
use crate::fetcher::{resource_url, ResourceKind, ResourceSource};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Fetches channel resources from the proxy API.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl HttpFetcher {
    /// Create a fetcher with its own HTTP client.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("channelwatch/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self::with_client(client, base_url, timeout))
    }

    /// Create a fetcher on top of an existing client.
    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            timeout,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn map_transport_error(&self, err: reqwest::Error, url: &str) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout(self.timeout)
        } else if err.is_connect() {
            FetchError::resource(format!("cannot connect to {}", url))
        } else {
            FetchError::resource(err.to_string())
        }
    }
}

#[async_trait]
impl ResourceSource for HttpFetcher {
    async fn fetch_resource(&self, kind: ResourceKind, id: &str) -> Result<Value, FetchError> {
        let url = resource_url(&self.base_url, kind, id);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e, &url))?;

        let status = response.status();
        if !status.is_success() {
            warn!("{} answered {}", url, status);
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| self.map_transport_error(e, &url))?;

        Ok(serde_json::from_slice(&body)?)
    }
}

//! Blocking HTTP transport for the remote JSON document.

use super::{DocumentStore, StoreError, StoreResponse, StoreResult};
use log::{error, info};
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use std::time::{Duration, Instant};

/// Document store reached over HTTP at one fixed URL.
///
/// `GET <url>` returns the whole document and `PUT <url>` replaces it.
#[derive(Debug, Clone)]
pub struct HttpDocumentStore {
    client: Client,
    url: String,
}

impl HttpDocumentStore {
    /// Builds a store client with the given request timeout.
    pub fn new(url: impl Into<String>, timeout: Duration) -> StoreResult<Self> {
        let url = url.into();
        if url.trim().is_empty() {
            return Err(StoreError::Unavailable("store url is empty".to_string()));
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, url })
    }

    /// Uses a caller-configured client (proxy, TLS, timeouts).
    pub fn with_client(url: impl Into<String>, client: Client) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

impl DocumentStore for HttpDocumentStore {
    fn get(&self) -> StoreResult<StoreResponse> {
        let started_at = Instant::now();
        let result = self
            .client
            .get(&self.url)
            .send()
            .and_then(|response| {
                let status = response.status().as_u16();
                response.text().map(|body| StoreResponse { status, body })
            });

        match result {
            Ok(response) => {
                info!(
                    "event=store_get module=store status=ok http_status={} bytes={} duration_ms={}",
                    response.status,
                    response.body.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(response)
            }
            Err(err) => {
                error!(
                    "event=store_get module=store status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err.into())
            }
        }
    }

    fn put(&self, body: String) -> StoreResult<u16> {
        let started_at = Instant::now();
        let bytes = body.len();
        let result = self
            .client
            .put(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send();

        match result {
            Ok(response) => {
                let status = response.status().as_u16();
                info!(
                    "event=store_put module=store status=ok http_status={} bytes={} duration_ms={}",
                    status,
                    bytes,
                    started_at.elapsed().as_millis()
                );
                Ok(status)
            }
            Err(err) => {
                error!(
                    "event=store_put module=store status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err.into())
            }
        }
    }
}

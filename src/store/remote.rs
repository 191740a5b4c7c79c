//! HTTP client for the document-store query gateway.
//!
//! Queries are posted as JSON to the gateway, which executes them against
//! the backing container and returns the matching documents. No retries:
//! any failure surfaces to the request boundary as-is.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;

use crate::config::StoreConfig;
use crate::types::Document;

use super::{DocumentQuery, DocumentStore};

/// Error body returned by the gateway on failure.
#[derive(Deserialize)]
struct GatewayError {
    error: String,
}

/// Remote store backed by the query gateway.
pub struct RemoteStore {
    query_url: String,
    api_key: Option<String>,
    http: reqwest::Client,
}

impl RemoteStore {
    pub fn new(config: &StoreConfig) -> Self {
        let base = config.base_url.trim_end_matches('/');
        Self {
            query_url: format!(
                "{}/dbs/{}/colls/{}/query",
                base, config.database, config.container
            ),
            api_key: config.resolve_api_key(),
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl DocumentStore for RemoteStore {
    async fn query_documents(&self, query: &DocumentQuery) -> Result<Vec<Document>> {
        let mut request = self.http.post(&self.query_url).json(query);
        if let Some(key) = &self.api_key {
            request = request.header("x-api-key", key);
        }

        let response = request
            .send()
            .await
            .context("Document store request failed")?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<GatewayError>()
                .await
                .map(|e| e.error)
                .unwrap_or_else(|_| format!("HTTP {status}"));
            anyhow::bail!("Document store query failed: {message}");
        }

        response
            .json::<Vec<Document>>()
            .await
            .context("Failed to decode document store response")
    }
}

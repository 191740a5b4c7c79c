//! In-memory document store.
//!
//! Evaluates the coarse filter in-process instead of shipping SQL to a
//! gateway: documents are narrowed by user and, when a term parameter is
//! bound, by the shared document-level predicate. Backs `--fixture` local
//! mode and the integration tests.

use std::cmp::Reverse;
use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::search::SearchTerm;
use crate::types::Document;

use super::{DocumentQuery, DocumentStore};

pub struct MemoryStore {
    documents: Vec<Document>,
}

impl MemoryStore {
    pub fn new(documents: Vec<Document>) -> Self {
        Self { documents }
    }

    /// Load a JSON array of documents from disk.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read fixture {}", path.display()))?;
        let documents: Vec<Document> = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse fixture {}", path.display()))?;
        tracing::info!("Loaded {} fixture documents", documents.len());
        Ok(Self { documents })
    }

    fn bound_parameter<'a>(query: &'a DocumentQuery, name: &str) -> Option<&'a str> {
        query
            .parameters
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.value.as_str())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn query_documents(&self, query: &DocumentQuery) -> Result<Vec<Document>> {
        let user_id =
            Self::bound_parameter(query, "@userId").context("Query binds no @userId parameter")?;
        let term = SearchTerm::parse(Self::bound_parameter(query, "@searchTerm"));

        let mut matched: Vec<Document> = self
            .documents
            .iter()
            .filter(|doc| doc.user_id == user_id && term.matches_document(doc))
            .cloned()
            .collect();

        if query.text.contains("ORDER BY c.timestamp DESC") {
            matched.sort_by_key(|doc| Reverse(doc.timestamp.clone()));
        }
        Ok(matched)
    }
}

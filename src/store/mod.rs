//! Access to the inventory document store.
//!
//! The core only ever consumes one operation: run a parameterized query,
//! get back deserialized documents. Connection handling, retries, and
//! partitioning all live behind the [`DocumentStore`] trait.

pub mod memory;
pub mod query;
pub mod remote;

pub use self::memory::MemoryStore;
pub use self::query::{DocumentQuery, QueryParameter};
pub use self::remote::RemoteStore;

use anyhow::Result;
use async_trait::async_trait;

use crate::types::Document;

/// Read-only query access to the document store.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Execute a parameterized query and return the matching documents in
    /// the order the query asks for.
    async fn query_documents(&self, query: &DocumentQuery) -> Result<Vec<Document>>;
}

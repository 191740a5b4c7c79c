//! Reshapes fetched documents into the trimmed result set.

use serde_json::Value;

use crate::types::{Document, Item};

use super::SearchTerm;

/// A document reshaped for a response: identity and metadata plus the item
/// subsequence that survived filtering. Transient, never persisted.
#[derive(Debug, Clone)]
pub struct ProjectedDocument {
    pub id: String,
    pub user_id: String,
    pub supplier_name: Option<String>,
    pub timestamp: String,
    pub batch_number: Option<Value>,
    /// Item count of the original document, before any filtering.
    pub total_items: usize,
    /// How many items matched. `None` in the no-term case, where the full
    /// item sequence is carried through untouched.
    pub matched_count: Option<usize>,
    pub items: Vec<Item>,
}

/// The assembled result set for one request, in store order.
#[derive(Debug, Clone, Default)]
pub struct Projection {
    pub documents: Vec<ProjectedDocument>,
    /// Sum of the item counts contributed by each document: matched items
    /// when a term is active, full counts otherwise.
    pub total_items_found: usize,
}

/// Project a single document against the request's search term.
///
/// With no term the document passes through whole. With a term, items are
/// filtered to matches (original relative order kept); a document with zero
/// matching items is dropped entirely rather than returned empty.
pub fn project_document(doc: Document, term: &SearchTerm) -> Option<ProjectedDocument> {
    let total_items = doc.items.len();

    if term.is_empty() {
        return Some(ProjectedDocument {
            id: doc.id,
            user_id: doc.user_id,
            supplier_name: doc.supplier_name,
            timestamp: doc.timestamp,
            batch_number: doc.batch_number,
            total_items,
            matched_count: None,
            items: doc.items,
        });
    }

    let matched: Vec<Item> = doc
        .items
        .iter()
        .filter(|item| term.matches_item(item, &doc))
        .cloned()
        .collect();
    if matched.is_empty() {
        return None;
    }

    Some(ProjectedDocument {
        id: doc.id,
        user_id: doc.user_id,
        supplier_name: doc.supplier_name,
        timestamp: doc.timestamp,
        batch_number: doc.batch_number,
        total_items,
        matched_count: Some(matched.len()),
        items: matched,
    })
}

/// Project every fetched document, preserving the store's ordering, and
/// accumulate the running totals the response wrappers report.
pub fn project_all(documents: Vec<Document>, term: &SearchTerm) -> Projection {
    let mut projection = Projection::default();
    for doc in documents {
        if let Some(projected) = project_document(doc, term) {
            projection.total_items_found += projected.matched_count.unwrap_or(projected.total_items);
            projection.documents.push(projected);
        }
    }
    projection
}

//! Free-text match predicate shared by both search endpoints.
//!
//! The store-side query only narrows the fetched document set; every item is
//! re-checked here, so this predicate is the source of truth for what counts
//! as a match.

use crate::types::{Document, Item, ITEM_TEXT_FIELDS};

/// A caller-supplied search term, parsed once per request.
///
/// Trimmed on parse; empty or whitespace-only input means "no filter". The
/// uppercase fold is computed at parse time so every comparison in the
/// request uses the same basis.
#[derive(Debug, Clone)]
pub struct SearchTerm {
    raw: Option<String>,
    upper: String,
}

impl SearchTerm {
    pub fn parse(raw: Option<&str>) -> Self {
        let trimmed = raw.map_or("", str::trim);
        if trimmed.is_empty() {
            Self {
                raw: None,
                upper: String::new(),
            }
        } else {
            Self {
                raw: Some(trimmed.to_string()),
                upper: trimmed.to_uppercase(),
            }
        }
    }

    /// True when no filtering is requested.
    pub fn is_empty(&self) -> bool {
        self.raw.is_none()
    }

    /// The trimmed term as supplied, or `None` for the no-filter case.
    pub fn as_str(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    /// Whether a single line item matches this term.
    ///
    /// An empty term matches everything. Otherwise the term must appear,
    /// case-insensitively, in one of the item's recognized text fields or in
    /// the parent document's supplier name. Absent fields read as empty
    /// strings and simply fail to contain the term.
    pub fn matches_item(&self, item: &Item, document: &Document) -> bool {
        if self.is_empty() {
            return true;
        }
        ITEM_TEXT_FIELDS
            .iter()
            .any(|key| item.text_field(key).to_uppercase().contains(&self.upper))
            || self.matches_supplier(document)
    }

    /// Document-level coarse check: supplier name or any item matches.
    ///
    /// This is what the in-memory store evaluates in place of the remote
    /// store's CONTAINS query, and it must never exclude a document the
    /// per-item check would accept.
    pub fn matches_document(&self, document: &Document) -> bool {
        if self.is_empty() {
            return true;
        }
        self.matches_supplier(document)
            || document
                .items
                .iter()
                .any(|item| self.matches_item(item, document))
    }

    fn matches_supplier(&self, document: &Document) -> bool {
        document
            .supplier_name
            .as_deref()
            .unwrap_or("")
            .to_uppercase()
            .contains(&self.upper)
    }
}

//! Builds the store-side filter for each endpoint.
//!
//! These queries are a coarse pre-filter: they must fetch a superset of the
//! true match set, since every item is re-checked in memory afterward. Both
//! search endpoints share one field list (`ITEM_TEXT_FIELDS`) with the
//! in-memory matcher, so the two filters cannot drift apart.

use serde::{Deserialize, Serialize};

use crate::search::SearchTerm;
use crate::types::ITEM_TEXT_FIELDS;

/// A parameterized store query plus execution hints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentQuery {
    #[serde(rename = "query")]
    pub text: String,
    pub parameters: Vec<QueryParameter>,
    /// The tenant key is not the partition key, so queries always span
    /// partitions.
    pub cross_partition: bool,
}

/// One bound query parameter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryParameter {
    pub name: String,
    pub value: String,
}

impl QueryParameter {
    fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}

/// Query for the search endpoints: a user's documents, newest first,
/// narrowed by the term when one is active.
pub fn documents_for_user(user_id: &str, term: &SearchTerm) -> DocumentQuery {
    let Some(raw_term) = term.as_str() else {
        return DocumentQuery {
            text: "SELECT * FROM c WHERE c.userId = @userId ORDER BY c.timestamp DESC".to_string(),
            parameters: vec![QueryParameter::new("@userId", user_id)],
            cross_partition: true,
        };
    };

    let item_clauses: Vec<String> = ITEM_TEXT_FIELDS
        .iter()
        .map(|field| format!("CONTAINS(UPPER(item['{field}']), UPPER(@searchTerm))"))
        .collect();
    let text = format!(
        "SELECT * FROM c \
         WHERE c.userId = @userId \
         AND (CONTAINS(UPPER(c.supplier_name), UPPER(@searchTerm)) \
         OR EXISTS(SELECT VALUE item FROM item IN c.items WHERE {})) \
         ORDER BY c.timestamp DESC",
        item_clauses.join(" OR ")
    );

    DocumentQuery {
        text,
        parameters: vec![
            QueryParameter::new("@userId", user_id),
            QueryParameter::new("@searchTerm", raw_term),
        ],
        cross_partition: true,
    }
}

/// Query for the stats endpoint: everything the user has, order irrelevant.
pub fn all_documents_for_user(user_id: &str) -> DocumentQuery {
    DocumentQuery {
        text: "SELECT * FROM c WHERE c.userId = @userId".to_string(),
        parameters: vec![QueryParameter::new("@userId", user_id)],
        cross_partition: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_term_fetches_all_for_user_newest_first() {
        let query = documents_for_user("u1", &SearchTerm::parse(None));
        assert!(query.text.contains("c.userId = @userId"));
        assert!(query.text.contains("ORDER BY c.timestamp DESC"));
        assert!(!query.text.contains("@searchTerm"));
        assert_eq!(query.parameters.len(), 1);
        assert_eq!(query.parameters[0].value, "u1");
        assert!(query.cross_partition);
    }

    #[test]
    fn term_query_covers_every_matcher_field() {
        let term = SearchTerm::parse(Some("rice"));
        let query = documents_for_user("u1", &term);
        for field in ITEM_TEXT_FIELDS {
            assert!(query.text.contains(&format!("item['{field}']")), "{field}");
        }
        assert!(query.text.contains("c.supplier_name"));
        assert!(query.text.contains("ORDER BY c.timestamp DESC"));
        assert_eq!(query.parameters[1].name, "@searchTerm");
        assert_eq!(query.parameters[1].value, "rice");
    }

    #[test]
    fn term_is_bound_trimmed() {
        let term = SearchTerm::parse(Some("  rice "));
        let query = documents_for_user("u1", &term);
        assert_eq!(query.parameters[1].value, "rice");
    }

    #[test]
    fn stats_query_is_unordered_and_unfiltered() {
        let query = all_documents_for_user("u1");
        assert_eq!(
            query.text,
            "SELECT * FROM c WHERE c.userId = @userId"
        );
        assert_eq!(query.parameters.len(), 1);
    }
}

//! Whole-inventory rollups for the stats endpoint.

use std::collections::{BTreeMap, BTreeSet};

use crate::types::Document;

/// Category label used for items that carry no `Category` field.
const UNKNOWN_CATEGORY: &str = "Unknown";

/// Aggregates computed over a user's full document set. Search terms play no
/// part here; the stats endpoint always sees everything.
#[derive(Debug, Clone, Default)]
pub struct InventoryStats {
    pub total_documents: usize,
    pub total_items: usize,
    /// Item count per category name, "Unknown" for uncategorized items.
    pub categories: BTreeMap<String, usize>,
    /// Distinct document-level supplier names. Documents without one
    /// contribute nothing.
    pub suppliers: BTreeSet<String>,
    /// Sum of numeric case prices, rounded to 2 decimal places.
    pub total_inventory_value: f64,
}

/// Single pass over all documents and their items.
///
/// Malformed or missing fields degrade to defaults and never abort the scan:
/// an absent category counts under "Unknown", a non-numeric case price adds
/// zero.
pub fn aggregate_stats(documents: &[Document]) -> InventoryStats {
    let mut stats = InventoryStats {
        total_documents: documents.len(),
        ..InventoryStats::default()
    };
    let mut total_value = 0.0_f64;

    for doc in documents {
        if let Some(supplier) = &doc.supplier_name {
            stats.suppliers.insert(supplier.clone());
        }
        for item in &doc.items {
            stats.total_items += 1;
            let category = item.category.as_deref().unwrap_or(UNKNOWN_CATEGORY);
            *stats.categories.entry(category.to_string()).or_insert(0) += 1;
            total_value += item.case_price_value();
        }
    }

    stats.total_inventory_value = (total_value * 100.0).round() / 100.0;
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Item;

    fn doc(supplier: Option<&str>, items: Vec<Item>) -> Document {
        Document {
            id: "d".to_string(),
            user_id: "u1".to_string(),
            supplier_name: supplier.map(str::to_string),
            timestamp: String::new(),
            batch_number: None,
            items,
        }
    }

    fn item(category: Option<&str>, case_price: serde_json::Value) -> Item {
        Item {
            category: category.map(str::to_string),
            case_price: Some(case_price),
            ..Item::default()
        }
    }

    #[test]
    fn counts_documents_and_items() {
        let docs = vec![
            doc(Some("Acme"), vec![Item::default(), Item::default()]),
            doc(Some("Sysco"), vec![Item::default()]),
            doc(None, vec![]),
        ];
        let stats = aggregate_stats(&docs);
        assert_eq!(stats.total_documents, 3);
        assert_eq!(stats.total_items, 3);
    }

    #[test]
    fn uncategorized_items_count_under_unknown() {
        let docs = vec![doc(
            None,
            vec![
                item(Some("Dry Grocery"), serde_json::json!(0)),
                item(Some("Dry Grocery"), serde_json::json!(0)),
                item(None, serde_json::json!(0)),
            ],
        )];
        let stats = aggregate_stats(&docs);
        assert_eq!(stats.categories.get("Dry Grocery"), Some(&2));
        assert_eq!(stats.categories.get("Unknown"), Some(&1));
    }

    #[test]
    fn suppliers_deduplicate_across_documents() {
        let docs = vec![
            doc(Some("Acme"), vec![]),
            doc(Some("Acme"), vec![]),
            doc(Some("Sysco"), vec![]),
            doc(None, vec![]),
        ];
        let stats = aggregate_stats(&docs);
        assert_eq!(stats.suppliers.len(), 2);
        assert!(stats.suppliers.contains("Acme"));
        assert!(stats.suppliers.contains("Sysco"));
    }

    #[test]
    fn value_sums_numbers_and_skips_the_rest() {
        let docs = vec![doc(
            None,
            vec![
                item(None, serde_json::json!(12.5)),
                item(None, serde_json::json!(7)),
                item(None, serde_json::json!("N/A")),
                Item::default(),
            ],
        )];
        let stats = aggregate_stats(&docs);
        assert_eq!(stats.total_inventory_value, 19.5);
    }

    #[test]
    fn value_rounds_to_two_decimals() {
        let docs = vec![doc(
            None,
            vec![
                item(None, serde_json::json!(0.1)),
                item(None, serde_json::json!(0.2)),
                item(None, serde_json::json!(0.125)),
            ],
        )];
        let stats = aggregate_stats(&docs);
        assert_eq!(stats.total_inventory_value, 0.43);
    }

    #[test]
    fn empty_document_set_yields_zeroes() {
        let stats = aggregate_stats(&[]);
        assert_eq!(stats.total_documents, 0);
        assert_eq!(stats.total_items, 0);
        assert!(stats.categories.is_empty());
        assert!(stats.suppliers.is_empty());
        assert_eq!(stats.total_inventory_value, 0.0);
    }
}

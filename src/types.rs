use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON keys of the item fields consulted by free-text matching.
///
/// The store-side query and the in-memory matcher are both driven by this
/// list, so the coarse filter is a superset of the fine one by construction.
pub const ITEM_TEXT_FIELDS: [&str; 7] = [
    "Inventory Item Name",
    "Item Name",
    "Category",
    "Item Number",
    "Supplier Name",
    "Measured In",
    "Inventory Unit of Measure",
];

/// One ingested inventory batch for a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "userId", default)]
    pub user_id: String,
    #[serde(default)]
    pub supplier_name: Option<String>,
    /// Ingestion timestamp, kept in the store's string form. Used only for
    /// the store-side descending ordering; never parsed here.
    #[serde(default)]
    pub timestamp: String,
    #[serde(rename = "batchNumber", default)]
    pub batch_number: Option<Value>,
    #[serde(default)]
    pub items: Vec<Item>,
}

/// One line entry within a document's item list.
///
/// Every recognized field is optional; items arrive from external ingestion
/// and a missing field reads as an empty string (or zero for `Case Price`),
/// never as an error. Unrecognized fields are carried through `extra` so
/// items serialize back unchanged into responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Item {
    #[serde(rename = "Inventory Item Name", skip_serializing_if = "Option::is_none")]
    pub inventory_item_name: Option<String>,
    #[serde(rename = "Item Name", skip_serializing_if = "Option::is_none")]
    pub item_name: Option<String>,
    #[serde(rename = "Category", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "Item Number", skip_serializing_if = "Option::is_none")]
    pub item_number: Option<String>,
    #[serde(rename = "Supplier Name", skip_serializing_if = "Option::is_none")]
    pub supplier_name: Option<String>,
    #[serde(rename = "Measured In", skip_serializing_if = "Option::is_none")]
    pub measured_in: Option<String>,
    #[serde(rename = "Inventory Unit of Measure", skip_serializing_if = "Option::is_none")]
    pub unit_of_measure: Option<String>,
    /// Price per case. Ingestion sometimes writes strings like "N/A" here;
    /// only JSON numbers count toward value aggregation.
    #[serde(rename = "Case Price", skip_serializing_if = "Option::is_none")]
    pub case_price: Option<Value>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl Item {
    /// Look up a matchable text field by its JSON key. Absent fields and
    /// unknown keys read as the empty string.
    pub fn text_field(&self, key: &str) -> &str {
        let field = match key {
            "Inventory Item Name" => &self.inventory_item_name,
            "Item Name" => &self.item_name,
            "Category" => &self.category,
            "Item Number" => &self.item_number,
            "Supplier Name" => &self.supplier_name,
            "Measured In" => &self.measured_in,
            "Inventory Unit of Measure" => &self.unit_of_measure,
            _ => &None,
        };
        field.as_deref().unwrap_or("")
    }

    /// Numeric case price, or 0.0 when absent or non-numeric.
    pub fn case_price_value(&self) -> f64 {
        self.case_price
            .as_ref()
            .and_then(Value::as_f64)
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_missing_fields_read_as_empty() {
        let item: Item = serde_json::from_str("{}").unwrap();
        for key in ITEM_TEXT_FIELDS {
            assert_eq!(item.text_field(key), "");
        }
        assert_eq!(item.case_price_value(), 0.0);
    }

    #[test]
    fn item_preserves_unrecognized_fields() {
        let raw = serde_json::json!({
            "Item Name": "White Rice",
            "Pack Size": "25 lb",
        });
        let item: Item = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(item.text_field("Item Name"), "White Rice");
        assert_eq!(serde_json::to_value(&item).unwrap(), raw);
    }

    #[test]
    fn non_numeric_case_price_is_zero() {
        let item: Item = serde_json::from_value(serde_json::json!({"Case Price": "N/A"})).unwrap();
        assert_eq!(item.case_price_value(), 0.0);

        let item: Item = serde_json::from_value(serde_json::json!({"Case Price": 12.5})).unwrap();
        assert_eq!(item.case_price_value(), 12.5);

        let item: Item = serde_json::from_value(serde_json::json!({"Case Price": 7})).unwrap();
        assert_eq!(item.case_price_value(), 7.0);
    }

    #[test]
    fn document_tolerates_sparse_json() {
        let doc: Document = serde_json::from_value(serde_json::json!({
            "id": "d1",
            "userId": "u1",
        }))
        .unwrap();
        assert_eq!(doc.id, "d1");
        assert!(doc.supplier_name.is_none());
        assert!(doc.items.is_empty());
    }
}

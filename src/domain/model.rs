use serde::{Deserialize, Serialize};

/// One normalized row from the tabular store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeRecord {
    pub record_id: String,
    pub species: String,
    pub dbh: String,
    pub height: String,
    pub condition: String,
    pub risk_rating: String,
}

impl TreeRecord {
    /// Build a record from one raw row (`{"id": ..., "fields": {...}}`).
    /// Absent fields fall back to their documented placeholders.
    pub fn from_row(row: &serde_json::Value) -> Self {
        let fields = row.get("fields");
        let field = |name: &str, default: &str| -> String {
            fields
                .and_then(|f| f.get(name))
                .map(stringify_field)
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            record_id: row
                .get("id")
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string(),
            species: field("Species", "Unknown"),
            dbh: field("DBH", "N/A"),
            height: field("Height", "N/A"),
            condition: field("Health Condition", "N/A"),
            risk_rating: field("Risk Rating", "N/A"),
        }
    }
}

/// String representation of a raw field value. Strings pass through,
/// null becomes empty, everything else is stringified.
fn stringify_field(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// One page of the tabular response, plus the continuation token
/// for the next page when there is one.
#[derive(Debug, Clone)]
pub struct RecordPage {
    pub records: Vec<TreeRecord>,
    pub offset: Option<String>,
}

use super::Column;

use indexmap::IndexMap;
use serde::Serialize;

/// Physical table definition, in the shape the remote create-table command
/// expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableDefinition {
    pub primary_key: String,
    pub columns: IndexMap<String, Column>,
}

impl TableDefinition {
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    pub fn to_wire(&self) -> serde_json::Value {
        // Column and IndexMap serialization is infallible
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

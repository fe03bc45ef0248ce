//! Table and column request parameters.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTablesQuery {
    /// e.g. `["table", "view"]`; sent comma-joined.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_types: Option<Vec<String>>,
    #[serde(
        default,
        deserialize_with = "super::optional_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub column_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTableRequest {
    pub name: String,
    pub columns: Vec<ColumnSpec>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListColumnsQuery {
    #[serde(
        default,
        deserialize_with = "super::optional_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub limit: Option<u32>,
}

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

/// Column-to-field mapping inferred by the backend. Purely advisory: the
/// client displays it and never validates it locally.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldMapping {
    #[serde(default)]
    pub mapping: BTreeMap<String, String>,
    pub confidence: f64,
    #[serde(default)]
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CsvAnalysis {
    #[serde(default)]
    pub original_columns: Vec<String>,
    pub mapping: FieldMapping,
    #[serde(default)]
    pub preview: Vec<Value>,
    #[serde(default)]
    pub total_rows: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImportOutcome {
    pub imported: u64,
    #[serde(default)]
    pub total: u64,
}

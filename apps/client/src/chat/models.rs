use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Intent the orchestrator detected for the last message.
#[derive(Debug, Clone, Deserialize)]
pub struct Intent {
    pub module: String,
    pub action: String,
    #[serde(default)]
    pub confidence: Option<f64>,
}

/// One prior turn, as the orchestrator expects it.
#[derive(Debug, Serialize)]
pub struct HistoryEntry {
    pub role: &'static str,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
    pub organization_id: Uuid,
    pub conversation_history: Vec<HistoryEntry>,
}

#[derive(Debug, Deserialize)]
pub struct ChatTurnResponse {
    pub message: String,
    #[serde(default)]
    pub intent: Option<Intent>,
    #[serde(default)]
    pub action_taken: Option<String>,
}

/// What the assistant can do, grouped by module.
#[derive(Debug, Deserialize)]
pub struct Capabilities {
    pub capabilities: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub examples: Vec<String>,
}

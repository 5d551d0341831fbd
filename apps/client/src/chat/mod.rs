//! Unified AI assistant — one conversation across finance, projects, and HR.

pub mod models;
pub mod page;

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use crate::api::ApiClient;
use crate::errors::ClientError;
use crate::protocol::{Author, Turn, TurnExchange, TurnReply};

use models::{Capabilities, ChatRequest, ChatTurnResponse, HistoryEntry, Intent};

/// Seeded greeting shown before the first user message.
pub const GREETING: &str = "Hi, I'm your Lightning assistant. I can add expenses, \
create projects, check on interviews, or just answer questions — what do you need?";

/// Fixed fallback appended when a round trip fails.
pub const FALLBACK: &str = "Sorry, I couldn't reach the assistant just now. Your \
message was not processed — please try again.";

/// One orchestrator round trip per user turn.
pub struct ChatExchange {
    api: ApiClient,
    organization_id: Uuid,
    /// Intent echoed by the orchestrator for the most recent turn.
    pub last_intent: Option<Intent>,
    pub last_action: Option<String>,
}

impl ChatExchange {
    pub fn new(api: ApiClient, organization_id: Uuid) -> Self {
        Self {
            api,
            organization_id,
            last_intent: None,
            last_action: None,
        }
    }
}

#[async_trait]
impl TurnExchange for ChatExchange {
    async fn exchange(
        &mut self,
        message: &str,
        window: &[Turn],
    ) -> Result<TurnReply, ClientError> {
        let conversation_history = window
            .iter()
            .map(|turn| HistoryEntry {
                role: match turn.author {
                    Author::Local => "user",
                    Author::Remote => "assistant",
                },
                content: turn.text.clone(),
            })
            .collect();

        let response: ChatTurnResponse = self
            .api
            .post(
                "/api/ai/chat",
                &ChatRequest {
                    message,
                    organization_id: self.organization_id,
                    conversation_history,
                },
            )
            .await?;

        self.last_intent = response.intent;
        self.last_action = response.action_taken;
        Ok(TurnReply {
            text: response.message,
            complete: false,
        })
    }
}

/// Legacy one-shot ask. The reply carries no envelope, just the text.
pub async fn ask(api: &ApiClient, message: &str) -> Result<String, ClientError> {
    let value = api
        .post_raw("/api/chat", &serde_json::json!({ "message": message }))
        .await?;
    value
        .get("response")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| ClientError::Rejected("assistant returned no response text".into()))
}

pub async fn capabilities(api: &ApiClient) -> Result<Capabilities, ClientError> {
    api.get("/api/ai/capabilities", &[]).await
}

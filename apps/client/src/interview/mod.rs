//! AI interview conductor — start, conduct, analyze, results.

pub mod models;
pub mod page;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::api::ApiClient;
use crate::errors::ClientError;
use crate::protocol::{Author, Turn, TurnExchange, TurnReply};

use models::{
    Analysis, InterviewDetails, InterviewStarted, InterviewSummary, RespondResponse, Speaker,
    StartForm, TranscriptEntry,
};

/// Fixed fallback appended when a respond round trip fails. The answer was
/// not recorded server side, so the candidate is told to resend it.
pub const FALLBACK: &str = "The interviewer is temporarily unreachable. Your last \
answer was not recorded — please send it again.";

/// Question count the conductor uses before the server reports one.
pub const DEFAULT_TOTAL_QUESTIONS: u32 = 8;

#[derive(Debug, Deserialize)]
struct InterviewList {
    interviews: Vec<InterviewSummary>,
}

#[derive(Debug, Deserialize)]
struct AnalysisEnvelope {
    analysis: Analysis,
}

pub async fn start(
    api: &ApiClient,
    organization_id: Uuid,
    form: &StartForm,
) -> Result<InterviewStarted, ClientError> {
    api.post(
        "/api/interview/start",
        &json!({
            "candidate_name": form.candidate_name,
            "candidate_email": form.candidate_email,
            "position": form.position,
            "organization_id": organization_id,
        }),
    )
    .await
}

pub async fn load(api: &ApiClient, interview_id: Uuid) -> Result<InterviewDetails, ClientError> {
    api.get(&format!("/api/interview/{interview_id}"), &[]).await
}

/// One-shot scoring call; the results view renders what it returns.
pub async fn analyze(api: &ApiClient, interview_id: Uuid) -> Result<Analysis, ClientError> {
    let envelope: AnalysisEnvelope = api
        .post("/api/interview/analyze", &json!({ "interview_id": interview_id }))
        .await?;
    Ok(envelope.analysis)
}

pub async fn list(
    api: &ApiClient,
    organization_id: Uuid,
) -> Result<Vec<InterviewSummary>, ClientError> {
    let list: InterviewList = api
        .get(
            "/api/interviews",
            &[("organization_id", organization_id.to_string())],
        )
        .await?;
    Ok(list.interviews)
}

/// Maps a server transcript onto protocol turns.
pub fn to_turns(transcripts: &[TranscriptEntry]) -> Vec<Turn> {
    transcripts
        .iter()
        .map(|entry| Turn {
            author: match entry.speaker {
                Speaker::Ai => Author::Remote,
                Speaker::Candidate => Author::Local,
            },
            text: entry.message.clone(),
            at: entry
                .timestamp
                .as_deref()
                .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
                .map(|parsed| parsed.with_timezone(&Utc))
                .unwrap_or_else(Utc::now),
        })
        .collect()
}

/// One respond round trip per candidate answer. Tracks the question counter
/// the server reports so the page can show progress.
pub struct InterviewExchange {
    api: ApiClient,
    interview_id: Uuid,
    pub question_number: u32,
    pub total_questions: u32,
}

impl InterviewExchange {
    pub fn new(api: ApiClient, interview_id: Uuid) -> Self {
        Self {
            api,
            interview_id,
            question_number: 1,
            total_questions: DEFAULT_TOTAL_QUESTIONS,
        }
    }
}

#[async_trait]
impl TurnExchange for InterviewExchange {
    async fn exchange(
        &mut self,
        message: &str,
        _window: &[Turn],
    ) -> Result<TurnReply, ClientError> {
        // The conductor holds the transcript server side; only the new
        // answer travels.
        let response: RespondResponse = self
            .api
            .post(
                "/api/interview/respond",
                &json!({
                    "interview_id": self.interview_id,
                    "candidate_response": message,
                }),
            )
            .await?;

        self.question_number = response.question_number;
        self.total_questions = response.total_questions;
        Ok(TurnReply {
            text: response.ai_message,
            complete: response.is_complete,
        })
    }
}

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Interview row as returned by the list and detail endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct InterviewSummary {
    pub id: Uuid,
    pub candidate_name: String,
    #[serde(default)]
    pub candidate_email: Option<String>,
    pub position: String,
    pub status: String,
    #[serde(default)]
    pub interview_date: Option<String>,
}

/// Server-side status value marking a finished interview.
pub const STATUS_COMPLETED: &str = "completed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    Ai,
    Candidate,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptEntry {
    pub speaker: Speaker,
    pub message: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StartForm {
    pub candidate_name: String,
    pub candidate_email: String,
    pub position: String,
}

#[derive(Debug, Deserialize)]
pub struct InterviewStarted {
    pub interview_id: Uuid,
    pub ai_message: String,
    pub question_number: u32,
    pub total_questions: u32,
}

#[derive(Debug, Deserialize)]
pub struct InterviewDetails {
    pub interview: InterviewSummary,
    #[serde(default)]
    pub transcripts: Vec<TranscriptEntry>,
    #[serde(default)]
    pub analysis: Option<Analysis>,
}

#[derive(Debug, Deserialize)]
pub struct RespondResponse {
    pub ai_message: String,
    pub question_number: u32,
    pub total_questions: u32,
    #[serde(default)]
    pub is_complete: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Analysis {
    pub overall_score: f64,
    pub technical_score: f64,
    pub communication_score: f64,
    pub cultural_fit_score: f64,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub key_insights: Option<String>,
    #[serde(default = "Recommendation::pending")]
    pub recommendation: Recommendation,
    #[serde(default)]
    pub detailed_analysis: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    StrongHire,
    Hire,
    Maybe,
    NoHire,
    #[serde(other)]
    Pending,
}

impl Recommendation {
    fn pending() -> Self {
        Recommendation::Pending
    }

    pub fn label(&self) -> &'static str {
        match self {
            Recommendation::StrongHire => "Strong Hire",
            Recommendation::Hire => "Hire",
            Recommendation::Maybe => "Maybe",
            Recommendation::NoHire => "No Hire",
            Recommendation::Pending => "Pending",
        }
    }
}

/// Display band for a 0–100 score; thresholds mirror the results view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Strong,
    Good,
    Mixed,
    Weak,
}

pub fn score_band(score: f64) -> ScoreBand {
    if score >= 80.0 {
        ScoreBand::Strong
    } else if score >= 60.0 {
        ScoreBand::Good
    } else if score >= 40.0 {
        ScoreBand::Mixed
    } else {
        ScoreBand::Weak
    }
}

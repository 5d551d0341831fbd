use thiserror::Error;

/// Application-level error type shared by every page controller.
///
/// Three families matter to the user: transport failures, responses the
/// backend rejected (`success: false`), and guard failures (no session /
/// no organization). Everything else is local plumbing.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Http { status: u16, message: String },

    /// The backend answered 2xx but set `success: false` in the envelope.
    #[error("backend rejected the request: {0}")]
    Rejected(String),

    #[error("response parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("not signed in")]
    MissingSession,

    #[error("no organization resolved for this user")]
    MissingTenant,

    /// Import attempted before a successful analyze pass.
    #[error("CSV must be analyzed successfully before import")]
    AnalyzeRequired,

    #[error("request cancelled")]
    Cancelled,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

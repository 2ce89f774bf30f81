//! Error taxonomy for the client.
//!
//! Every failure surfaced to the user flows through [`AppError`]: backend
//! HTTP failures, form validation, document ingestion, and the AI analysis
//! call. Variants carry a ready-to-render message; the shell prints them
//! inline next to the command that triggered them.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Transport failure before any HTTP status was received.
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx backend response. The message is the server's `message`
    /// field when present, otherwise `Request failed (<status>)`.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// Form-level rejection raised before any request is made.
    #[error("{0}")]
    Validation(String),

    /// Wrong file type or empty document handed to the analysis pipeline.
    #[error("{0}")]
    UnsupportedInput(String),

    /// No Gemini API key in the environment or local storage. The shell
    /// reacts by prompting for a key and retrying.
    #[error("Missing Gemini API key. Set GEMINI_API_KEY in the environment, or save one with `key set` (stored under the state directory).")]
    MissingApiKey,

    /// The AI service answered, but not with parseable analysis JSON.
    #[error("Failed to analyze document: {0}")]
    MalformedResponse(String),

    /// Local filesystem or state failure.
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status, when this error came from a backend response.
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the failure is resolved by supplying a Gemini API key.
    pub fn requires_api_key(&self) -> bool {
        matches!(self, AppError::MissingApiKey)
    }

    /// Whether the backend rejected the bearer credential.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AppError::Http { status: 401 | 403, .. })
    }

    /// Stable label for log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Network(_) => "network",
            AppError::Http { .. } => "http",
            AppError::Validation(_) => "validation",
            AppError::UnsupportedInput(_) => "unsupported_input",
            AppError::MissingApiKey => "missing_api_key",
            AppError::MalformedResponse(_) => "malformed_response",
            AppError::Internal(_) => "internal",
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", e))
    }
}

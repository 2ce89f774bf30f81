//! AI document review: load a document, send it to Gemini, and get back
//! a structured report of summary, suggestions, and warnings.

pub mod gemini;
pub mod ingest;
pub mod prompts;

use serde::{Deserialize, Serialize};

/// Structured review produced by the model. `summary` is required; a
/// response without it counts as malformed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub summary: String,
    #[serde(default)]
    pub suggestions: Vec<Suggestion>,
    #[serde(default)]
    pub warnings: Vec<Warning>,
}

/// A clause worth the reader's attention. Not necessarily bad.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub title: String,
    pub details: String,
}

/// A potential red flag: the clause and why it is a problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warning {
    pub clause: String,
    pub reason: String,
}

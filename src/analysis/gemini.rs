//! REST client for Google's Generative Language API.
//!
//! One endpoint, `models/{model}:generateContent`, authenticated with the
//! `x-goog-api-key` header. Responses are requested as JSON against a
//! schema, but the model occasionally wraps its output in a markdown
//! fence anyway, so parsing strips one before giving up.

use serde::Deserialize;
use serde_json::json;

use super::ingest::DocumentInput;
use super::prompts;
use super::AnalysisReport;
use crate::error::AppError;
use crate::storage::Storage;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    /// Build a client if a key is available: the `GEMINI_API_KEY`
    /// environment variable wins, then the key saved in the state
    /// directory.
    pub fn from_env_or_storage(model: &str, storage: &Storage) -> Result<Self, AppError> {
        let key = std::env::var("GEMINI_API_KEY")
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .or_else(|| storage.load_gemini_key());
        match key {
            Some(api_key) => Ok(Self::new(&api_key, model)),
            None => Err(AppError::MissingApiKey),
        }
    }

    pub fn new(api_key: &str, model: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        }
    }

    /// Run one review request and parse the structured report.
    pub async fn analyze(&self, input: &DocumentInput) -> Result<AnalysisReport, AppError> {
        let parts = prompts::build_parts(input)?;
        let body = json!({
            "systemInstruction": { "parts": [ { "text": prompts::SYSTEM_INSTRUCTION } ] },
            "contents": [ { "parts": parts } ],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": prompts::response_schema(),
                "temperature": 0.2
            }
        });

        let url = format!("{}/{}:generateContent", GEMINI_API_BASE, self.model);
        log::debug!("POST {} ({})", url, input.name());

        let resp = self
            .http
            .post(&url)
            .header("x-goog-api-key", self.api_key.clone())
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let text = resp.text().await.unwrap_or_default();
            return Err(AppError::Http {
                status,
                message: gemini_error_message(status, &text),
            });
        }

        let response: GenerateContentResponse = resp
            .json()
            .await
            .map_err(|e| AppError::MalformedResponse(e.to_string()))?;

        parse_report(&response.concatenated_text())
    }
}

/// Gemini error bodies nest the useful message under `error.message`.
fn gemini_error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .as_ref()
        .and_then(|v| v.get("error"))
        .and_then(|e| e.get("message"))
        .and_then(serde_json::Value::as_str)
        .map(|m| m.to_string())
        .unwrap_or_else(|| format!("Gemini API error {}: {}", status, body))
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateContentResponse {
    fn concatenated_text(&self) -> String {
        self.candidates
            .iter()
            .filter_map(|c| c.content.as_ref())
            .flat_map(|c| c.parts.iter())
            .filter_map(|p| p.text.as_deref())
            .collect()
    }
}

fn parse_report(raw: &str) -> Result<AnalysisReport, AppError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::MalformedResponse(
            "empty model response".to_string(),
        ));
    }
    serde_json::from_str(strip_fence(trimmed))
        .map_err(|e| AppError::MalformedResponse(e.to_string()))
}

/// Remove a leading ```` ```json ```` fence and a trailing ```` ``` ````.
fn strip_fence(text: &str) -> &str {
    let mut s = text;
    if let Some(rest) = s.strip_prefix("```json") {
        s = rest.trim_start();
    }
    if let Some(rest) = s.strip_suffix("```") {
        s = rest;
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT_JSON: &str = r#"{
        "summary": "A lease agreement.",
        "suggestions": [{"title": "Review term", "details": "Check the dates."}],
        "warnings": [{"clause": "Tenant pays all repairs", "reason": "One-sided."}]
    }"#;

    #[test]
    fn test_parse_report_plain_json() {
        let report = parse_report(REPORT_JSON).unwrap();
        assert_eq!(report.summary, "A lease agreement.");
        assert_eq!(report.suggestions.len(), 1);
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_parse_report_strips_markdown_fence() {
        let fenced = format!("```json\n{}```", REPORT_JSON);
        let report = parse_report(&fenced).unwrap();
        assert_eq!(report.summary, "A lease agreement.");
    }

    #[test]
    fn test_parse_report_rejects_non_json() {
        let err = parse_report("I could not analyze this document.").unwrap_err();
        assert!(matches!(err, AppError::MalformedResponse(_)));
        assert!(err.to_string().starts_with("Failed to analyze document:"));
    }

    #[test]
    fn test_parse_report_rejects_empty() {
        assert!(parse_report("   ").is_err());
    }

    #[test]
    fn test_report_without_summary_is_malformed() {
        let err = parse_report(r#"{"suggestions": [], "warnings": []}"#).unwrap_err();
        assert!(matches!(err, AppError::MalformedResponse(_)));
    }

    #[test]
    fn test_concatenated_text_joins_parts() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"{\"summary\""},{"text":": \"x\"}"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(response.concatenated_text(), "{\"summary\": \"x\"}");
    }

    #[test]
    fn test_error_message_extraction() {
        let body = r#"{"error":{"code":400,"message":"API key not valid","status":"INVALID_ARGUMENT"}}"#;
        assert_eq!(gemini_error_message(400, body), "API key not valid");
        assert_eq!(
            gemini_error_message(500, "upstream exploded"),
            "Gemini API error 500: upstream exploded"
        );
    }
}

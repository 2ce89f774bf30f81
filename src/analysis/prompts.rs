//! Prompt text and response schema for document review.

use serde_json::{json, Value};

use super::ingest::DocumentInput;
use crate::error::AppError;

/// System instruction sent with every review request.
pub const SYSTEM_INSTRUCTION: &str = "\
You are an expert AI legal assistant. Your task is to analyze a legal document provided by a user.
Do not provide legal advice. Instead, your goal is to help the user understand the document better by breaking it down.
Perform the following three actions based on the document text:
1.  **Summarize:** Create a neutral, high-level summary of the document's purpose.
2.  **Suggest:** Identify key clauses or sections that the user should pay close attention to. These are not necessarily bad, but are important.
3.  **Warn:** Pinpoint any clauses that seem ambiguous, overly broad, one-sided, or generally 'sketchy'. These are potential red flags.
Provide your analysis in the specified JSON format.";

/// Extra instruction attached after an image so the model OCRs it first.
pub const OCR_INSTRUCTION: &str = "This image contains a legal document. First, perform OCR to extract all text from the document. Then, analyze the extracted text to provide a summary, suggestions, and warnings as per the instructions.";

/// Request parts for a document. Text goes in as-is; images go in as
/// inline data followed by the OCR instruction.
pub fn build_parts(input: &DocumentInput) -> Result<Vec<Value>, AppError> {
    match input {
        DocumentInput::Text { content, .. } => {
            if content.trim().is_empty() {
                return Err(AppError::Validation(
                    "Document text cannot be empty.".to_string(),
                ));
            }
            Ok(vec![json!({ "text": content })])
        }
        DocumentInput::Image {
            mime_type, data, ..
        } => Ok(vec![
            json!({ "inlineData": { "mimeType": mime_type, "data": data } }),
            json!({ "text": OCR_INSTRUCTION }),
        ]),
    }
}

/// Schema the model must answer with. Gemini's schema dialect tags types
/// in uppercase.
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "summary": {
                "type": "STRING",
                "description": "A concise, neutral summary of the legal document's main purpose and key terms. Should be 3-5 sentences long."
            },
            "suggestions": {
                "type": "ARRAY",
                "description": "Actionable suggestions or points of interest for the user to consider. Focus on important clauses they should review carefully.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": {
                            "type": "STRING",
                            "description": "A short, descriptive title for the suggestion (e.g., 'Review Liability Clause')."
                        },
                        "details": {
                            "type": "STRING",
                            "description": "A clear, detailed explanation of why this point is important and what the user should consider."
                        }
                    },
                    "required": ["title", "details"]
                }
            },
            "warnings": {
                "type": "ARRAY",
                "description": "A list of potential 'red flags' or sketchy clauses. These should be parts of the document that are ambiguous, one-sided, or potentially disadvantageous to one party.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "clause": {
                            "type": "STRING",
                            "description": "The exact (or slightly paraphrased for brevity) problematic clause from the document."
                        },
                        "reason": {
                            "type": "STRING",
                            "description": "A clear explanation of why this clause is a potential issue or 'red flag'."
                        }
                    },
                    "required": ["clause", "reason"]
                }
            }
        },
        "required": ["summary", "suggestions", "warnings"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_becomes_a_single_part() {
        let input = DocumentInput::Text {
            name: "a.txt".to_string(),
            content: "clause one".to_string(),
        };
        let parts = build_parts(&input).unwrap();
        assert_eq!(parts, vec![json!({ "text": "clause one" })]);
    }

    #[test]
    fn test_blank_text_is_rejected() {
        let input = DocumentInput::Text {
            name: "a.txt".to_string(),
            content: "   \n".to_string(),
        };
        let err = build_parts(&input).unwrap_err();
        assert_eq!(err.to_string(), "Document text cannot be empty.");
    }

    #[test]
    fn test_image_gets_inline_data_then_ocr_instruction() {
        let input = DocumentInput::Image {
            name: "scan.png".to_string(),
            mime_type: "image/png".to_string(),
            data: "aGVsbG8=".to_string(),
        };
        let parts = build_parts(&input).unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0]["inlineData"]["mimeType"], "image/png");
        assert_eq!(parts[1]["text"], OCR_INSTRUCTION);
    }

    #[test]
    fn test_schema_requires_all_three_sections() {
        let schema = response_schema();
        assert_eq!(schema["type"], "OBJECT");
        assert_eq!(
            schema["required"],
            json!(["summary", "suggestions", "warnings"])
        );
        assert_eq!(schema["properties"]["warnings"]["type"], "ARRAY");
    }
}

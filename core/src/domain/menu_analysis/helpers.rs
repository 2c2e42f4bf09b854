use tracing::error;

use crate::domain::menu_analysis::entities::{AnalysisError, AnalysisResult};

const FENCE: &str = "```";

/// Removes markdown code-fence markers (triple backticks, optionally tagged
/// `json`, each with one optional trailing newline) and trims the result.
pub fn strip_code_fences(text: &str) -> String {
    let mut cleaned = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find(FENCE) {
        cleaned.push_str(&rest[..pos]);
        rest = &rest[pos + FENCE.len()..];
        rest = rest.strip_prefix("json").unwrap_or(rest);
        rest = rest.strip_prefix('\n').unwrap_or(rest);
    }
    cleaned.push_str(rest);

    cleaned.trim().to_string()
}

/// Parses a model reply into an [`AnalysisResult`], tolerating code fences.
pub fn parse_analysis_result(raw_response: &str) -> Result<AnalysisResult, AnalysisError> {
    let cleaned = strip_code_fences(raw_response);

    serde_json::from_str(&cleaned).map_err(|e| {
        error!("Failed to parse LLM response: {}", e);
        AnalysisError::Parse {
            reason: e.to_string(),
        }
    })
}

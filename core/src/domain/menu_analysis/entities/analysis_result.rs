use serde::{Deserialize, Serialize};
use serde_json::Number;
use utoipa::ToSchema;

/// Dishes suggested by the model, in the order the model presented them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AnalysisResult {
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub dish: String,
    /// Currency amount as written by the model, e.g. "12.99".
    pub price: String,
    pub reasoning: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warnings: Option<String>,
    /// Nominally 1-10; any JSON number is passed through unchecked.
    #[schema(value_type = f64)]
    pub value_score: Number,
}

impl Recommendation {
    pub fn value_score_f64(&self) -> f64 {
        self.value_score.as_f64().unwrap_or(0.0)
    }

    /// The warning text, or `None` when the model left it absent or blank.
    pub fn warning(&self) -> Option<&str> {
        self.warnings
            .as_deref()
            .map(str::trim)
            .filter(|w| !w.is_empty())
    }
}

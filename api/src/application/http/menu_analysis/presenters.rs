use menuwise_core::domain::menu_analysis::entities::{AnalysisResult, Recommendation};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

const STAR: &str = "⭐";
const MAX_STARS: f64 = 5.0;

/// Display-ready form of a [`Recommendation`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RecommendationCard {
    pub dish: String,
    pub price: String,
    pub reasoning: String,
    pub warning: Option<String>,
    pub stars: String,
    pub score_label: String,
}

impl From<&Recommendation> for RecommendationCard {
    fn from(rec: &Recommendation) -> Self {
        Self {
            dish: rec.dish.clone(),
            price: format_price(&rec.price),
            reasoning: rec.reasoning.clone(),
            warning: rec.warning().map(str::to_string),
            stars: render_stars(rec.value_score_f64()),
            score_label: format!("{}/10", rec.value_score),
        }
    }
}

pub fn present(result: &AnalysisResult) -> Vec<RecommendationCard> {
    result
        .recommendations
        .iter()
        .map(RecommendationCard::from)
        .collect()
}

/// One star per two points of value score, rounded half up, between 0 and 5.
pub fn render_stars(score: f64) -> String {
    let count = (score / 2.0).round().clamp(0.0, MAX_STARS) as usize;
    STAR.repeat(count)
}

pub fn format_price(price: &str) -> String {
    let price = price.trim();
    if price.starts_with('$') {
        price.to_string()
    } else {
        format!("${price}")
    }
}

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::image::entities::MenuImage;

/// Dining preferences entered by the user. Blank fields mean "unspecified".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Preferences {
    #[serde(default)]
    pub dietary: String,
    #[serde(default)]
    pub budget: String,
    #[serde(default)]
    pub mood: String,
}

impl Preferences {
    pub fn new(
        dietary: impl Into<String>,
        budget: impl Into<String>,
        mood: impl Into<String>,
    ) -> Self {
        Self {
            dietary: dietary.into(),
            budget: budget.into(),
            mood: mood.into(),
        }
    }

    pub fn dietary(&self) -> Option<&str> {
        specified(&self.dietary)
    }

    /// Budget amount without any leading currency sign.
    pub fn budget(&self) -> Option<&str> {
        specified(&self.budget)
            .map(|b| b.trim_start_matches('$').trim())
            .filter(|b| !b.is_empty())
    }

    pub fn mood(&self) -> Option<&str> {
        specified(&self.mood)
    }
}

fn specified(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty()).then_some(value)
}

#[derive(Debug, Clone)]
pub struct AnalyzeMenuInput {
    pub image: Option<MenuImage>,
    pub preferences: Preferences,
}

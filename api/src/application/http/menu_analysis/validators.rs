use menuwise_core::domain::menu_analysis::value_objects::Preferences;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

pub const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024; // 10MB

#[derive(Debug, Default, Validate)]
pub struct PreferencesForm {
    #[validate(length(max = 200, message = "dietary must be at most 200 characters"))]
    pub dietary: String,
    #[validate(
        length(max = 200, message = "budget must be at most 200 characters"),
        custom(function = "validate_budget")
    )]
    pub budget: String,
    #[validate(length(max = 200, message = "mood must be at most 200 characters"))]
    pub mood: String,
}

impl From<PreferencesForm> for Preferences {
    fn from(form: PreferencesForm) -> Self {
        Preferences::new(form.dietary, form.budget, form.mood)
    }
}

/// Multipart body accepted by the analysis endpoint, for the OpenAPI document.
#[allow(dead_code)]
#[derive(ToSchema)]
pub struct AnalyzeMenuForm {
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
    pub dietary: Option<String>,
    #[schema(example = "20")]
    pub budget: Option<String>,
    pub mood: Option<String>,
}

fn validate_budget(budget: &str) -> Result<(), ValidationError> {
    let amount = budget.trim().trim_start_matches('$').trim();
    if amount.is_empty() {
        return Ok(());
    }

    match amount.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(()),
        _ => Err(ValidationError::new("budget")
            .with_message("budget must be a non-negative number".into())),
    }
}

pub fn is_image_mime(mime_type: &str) -> bool {
    mime_type.trim().to_ascii_lowercase().starts_with("image/")
}

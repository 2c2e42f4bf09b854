use std::future::Future;

use crate::domain::{
    image::entities::EncodedImage,
    menu_analysis::{
        entities::{AnalysisError, AnalysisResult, LLMError},
        value_objects::AnalyzeMenuInput,
    },
};

/// LLM Client trait for calling multimodal models
pub trait LLMClient: Send + Sync {
    /// Sends a text prompt plus one inline image and returns the reply text.
    fn generate_with_image(
        &self,
        prompt: String,
        image: EncodedImage,
    ) -> impl Future<Output = Result<String, LLMError>> + Send;

    fn list_models(&self) -> impl Future<Output = Result<Vec<String>, LLMError>> + Send;
}

/// Service trait for menu analysis business logic
pub trait MenuAnalysisService: Send + Sync {
    fn analyze_menu(
        &self,
        input: AnalyzeMenuInput,
    ) -> impl Future<Output = Result<AnalysisResult, AnalysisError>> + Send;

    /// Names of the models visible to the configured credential. Diagnostic only.
    fn list_available_models(&self) -> impl Future<Output = Result<Vec<String>, LLMError>> + Send;
}

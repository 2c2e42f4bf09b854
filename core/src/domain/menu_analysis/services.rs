use tracing::{debug, error, info, instrument};

use crate::domain::{
    common::services::Service,
    image::services::encode_image,
    menu_analysis::{
        entities::{AnalysisError, AnalysisResult, LLMError},
        helpers::parse_analysis_result,
        ports::{LLMClient, MenuAnalysisService},
        value_objects::AnalyzeMenuInput,
    },
    prompt::build_prompt,
};

impl<LLM> MenuAnalysisService for Service<LLM>
where
    LLM: LLMClient,
{
    #[instrument(skip(self, input), fields(has_image = input.image.is_some()))]
    async fn analyze_menu(&self, input: AnalyzeMenuInput) -> Result<AnalysisResult, AnalysisError> {
        // 1. Nothing to analyze without an image; fail before any network activity
        let image = input.image.ok_or(AnalysisError::MissingImage)?;

        // 2. Wait for the rate limiter
        self.rate_limiter.acquire().await;

        info!(
            mime_type = %image.mime_type,
            size_bytes = image.data.len(),
            "Starting menu analysis"
        );

        // 3. Encode image
        let encoded = encode_image(image.data.as_ref(), &image.mime_type).await?;

        // 4. Build prompt
        let prompt = build_prompt(&input.preferences);

        // 5. Call LLM
        let raw_response = self
            .llm_client
            .generate_with_image(prompt, encoded)
            .await
            .map_err(|e| {
                error!(kind = ?e.kind, status = e.status, "LLM request failed: {}", e);
                AnalysisError::from(e)
            })?;
        debug!(raw_response = %raw_response, "Response received from LLM");

        // 6. Strip fences and parse
        let result = parse_analysis_result(&raw_response)?;

        info!(
            recommendations = result.recommendations.len(),
            "Menu analysis completed"
        );

        Ok(result)
    }

    async fn list_available_models(&self) -> Result<Vec<String>, LLMError> {
        self.llm_client.list_models().await
    }
}

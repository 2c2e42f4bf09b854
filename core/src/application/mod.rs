use crate::{
    domain::{
        common::{MenuwiseConfig, entities::app_errors::CoreError, services::Service},
        rate_limit::RateLimiter,
    },
    infrastructure::llm::GeminiLLMClient,
};

pub type MenuwiseService = Service<GeminiLLMClient>;

pub fn create_service(config: MenuwiseConfig) -> Result<MenuwiseService, CoreError> {
    let llm_client = GeminiLLMClient::new(&config.llm)?;
    let rate_limiter = RateLimiter::new(config.rate_limit.min_request_interval);

    tracing::info!(
        model = %config.llm.gemini_model,
        min_request_interval_ms = config.rate_limit.min_request_interval.as_millis() as u64,
        "Menu analysis service configured"
    );

    Ok(Service::new(llm_client, rate_limiter))
}

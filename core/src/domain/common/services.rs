use std::sync::Arc;

use crate::domain::{menu_analysis::ports::LLMClient, rate_limit::RateLimiter};

pub struct Service<LLM>
where
    LLM: LLMClient,
{
    pub(crate) llm_client: Arc<LLM>,
    pub(crate) rate_limiter: Arc<RateLimiter>,
}

impl<LLM> Service<LLM>
where
    LLM: LLMClient,
{
    pub fn new(llm_client: LLM, rate_limiter: RateLimiter) -> Self {
        Self {
            llm_client: Arc::new(llm_client),
            rate_limiter: Arc::new(rate_limiter),
        }
    }
}

// Clones share the client and, more importantly, the limiter's last-request slot.
impl<LLM> Clone for Service<LLM>
where
    LLM: LLMClient,
{
    fn clone(&self) -> Self {
        Self {
            llm_client: Arc::clone(&self.llm_client),
            rate_limiter: Arc::clone(&self.rate_limiter),
        }
    }
}

use std::{fmt, time::Duration};

pub mod entities;
pub mod services;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Clone, Debug)]
pub struct MenuwiseConfig {
    pub llm: LLMConfig,
    pub rate_limit: RateLimitConfig,
}

#[derive(Clone)]
pub struct LLMConfig {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
}

impl LLMConfig {
    pub fn has_api_key(&self) -> bool {
        !self.gemini_api_key.trim().is_empty()
    }
}

// Keeps the credential out of `{:?}` output, which ends up in logs.
impl fmt::Debug for LLMConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LLMConfig")
            .field(
                "gemini_api_key",
                &if self.has_api_key() { "<redacted>" } else { "<unset>" },
            )
            .field("gemini_model", &self.gemini_model)
            .field("gemini_base_url", &self.gemini_base_url)
            .finish()
    }
}

#[derive(Clone, Debug)]
pub struct RateLimitConfig {
    pub min_request_interval: Duration,
}

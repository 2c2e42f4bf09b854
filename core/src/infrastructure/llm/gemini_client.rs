use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::domain::{
    common::{LLMConfig, entities::app_errors::CoreError},
    image::entities::EncodedImage,
    menu_analysis::{
        entities::{LLMError, LLMFailureKind},
        ports::LLMClient,
    },
};

// The key never goes in the URL: reqwest error text includes it.
const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Clone)]
pub struct GeminiLLMClient {
    api_key: String,
    model_name: String,
    base_url: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default, rename = "promptFeedback")]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<ContentResponse>,
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Debug, Deserialize)]
struct PartResponse {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PromptFeedback {
    #[serde(default, rename = "blockReason")]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorEnvelope {
    error: GeminiErrorBody,
}

#[derive(Debug, Default, Deserialize)]
struct GeminiErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
    #[serde(default)]
    details: Vec<GeminiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorDetail {
    #[serde(default)]
    reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ModelList {
    #[serde(default)]
    models: Vec<ModelInfo>,
}

#[derive(Debug, Deserialize)]
struct ModelInfo {
    name: String,
}

impl GeminiLLMClient {
    pub fn new(config: &LLMConfig) -> Result<Self, CoreError> {
        let client = Client::builder()
            .user_agent(concat!("menuwise/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                CoreError::ExternalServiceError(format!("Failed to build HTTP client: {}", e))
            })?;

        let base_url = config.gemini_base_url.trim().trim_end_matches('/');
        if base_url.is_empty() {
            return Err(CoreError::InvalidConfiguration(
                "Gemini base URL must not be empty".to_string(),
            ));
        }

        Ok(Self {
            api_key: config.gemini_api_key.trim().to_string(),
            model_name: config.gemini_model.clone(),
            base_url: base_url.to_string(),
            client,
        })
    }

    async fn call_gemini_api(&self, request: GeminiRequest) -> Result<String, LLMError> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url, self.model_name
        );

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                tracing::error!("Gemini API request failed: {}", e);
                LLMError::new(LLMFailureKind::Transport, format!("LLM API error: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Gemini API error: {} - {}", status, error_text);
            return Err(classify_failure(status, &error_text));
        }

        let gemini_response: GeminiResponse = response.json().await.map_err(|e| {
            let e = e.without_url();
            tracing::error!("Failed to parse Gemini response: {}", e);
            LLMError::new(
                LLMFailureKind::MalformedResponse,
                format!("Failed to parse LLM response: {}", e),
            )
            .with_status(status.as_u16())
        })?;

        extract_text(gemini_response)
    }
}

impl LLMClient for GeminiLLMClient {
    #[instrument(skip(self, prompt, image), fields(model = %self.model_name, mime_type = %image.mime_type))]
    async fn generate_with_image(
        &self,
        prompt: String,
        image: EncodedImage,
    ) -> Result<String, LLMError> {
        let request = GeminiRequest {
            contents: vec![Content {
                parts: vec![
                    Part::Text { text: prompt },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: image.mime_type,
                            data: image.data,
                        },
                    },
                ],
            }],
        };

        self.call_gemini_api(request).await
    }

    async fn list_models(&self) -> Result<Vec<String>, LLMError> {
        let url = format!("{}/models", self.base_url);

        let response = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(|e| {
                LLMError::new(
                    LLMFailureKind::Transport,
                    format!("LLM API error: {}", e.without_url()),
                )
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(classify_failure(status, &error_text));
        }

        let list: ModelList = response.json().await.map_err(|e| {
            LLMError::new(
                LLMFailureKind::MalformedResponse,
                format!("Failed to parse model list: {}", e.without_url()),
            )
        })?;

        Ok(list.models.into_iter().map(|m| m.name).collect())
    }
}

/// Concatenates the text parts of the first candidate.
fn extract_text(response: GeminiResponse) -> Result<String, LLMError> {
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect()
        })
        .unwrap_or_default();

    if !text.is_empty() {
        return Ok(text);
    }

    let message = match response.prompt_feedback.and_then(|f| f.block_reason) {
        Some(reason) => format!("Request blocked by the model ({})", reason),
        None => "No response from LLM".to_string(),
    };
    Err(LLMError::new(LLMFailureKind::EmptyResponse, message))
}

/// Maps an unsuccessful HTTP response onto an [`LLMFailureKind`].
///
/// Gemini reports a rejected key as `400 INVALID_ARGUMENT` with an
/// `API_KEY_INVALID` reason, so the structured body takes precedence over the
/// status code.
fn classify_failure(status: StatusCode, body: &str) -> LLMError {
    let error = serde_json::from_str::<GeminiErrorEnvelope>(body)
        .map(|envelope| envelope.error)
        .unwrap_or_default();

    let key_rejected = error
        .details
        .iter()
        .any(|d| d.reason.as_deref() == Some("API_KEY_INVALID"));

    let kind = if key_rejected
        || status == StatusCode::UNAUTHORIZED
        || status == StatusCode::FORBIDDEN
        || matches!(error.status.as_str(), "UNAUTHENTICATED" | "PERMISSION_DENIED")
    {
        LLMFailureKind::Unauthenticated
    } else if status == StatusCode::TOO_MANY_REQUESTS || error.status == "RESOURCE_EXHAUSTED" {
        LLMFailureKind::ResourceExhausted
    } else if status.is_server_error() {
        LLMFailureKind::Unavailable
    } else {
        LLMFailureKind::InvalidRequest
    };

    let message = if error.message.is_empty() {
        format!("LLM API returned error: {}", status)
    } else {
        error.message
    };

    LLMError::new(kind, message).with_status(status.as_u16())
}

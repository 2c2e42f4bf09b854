use axum::extract::{Multipart, State, multipart::Field};
use menuwise_core::domain::{
    image::entities::MenuImage,
    menu_analysis::{
        entities::{AnalysisError, AnalysisResult},
        ports::MenuAnalysisService,
        value_objects::AnalyzeMenuInput,
    },
};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::http::{
    menu_analysis::{
        presenters::{RecommendationCard, present},
        validators::{AnalyzeMenuForm, MAX_IMAGE_SIZE, PreferencesForm, is_image_mime},
    },
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse},
            response::Response,
        },
        app_state::AppState,
    },
};

#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnalyzeMenuResponse {
    pub data: AnalysisResult,
    pub cards: Vec<RecommendationCard>,
}

#[utoipa::path(
    post,
    path = "",
    tag = "menu-analysis",
    summary = "Recommend dishes from a menu photo",
    description = "Sends the uploaded menu image and dining preferences to the LLM and returns 2-3 recommended dishes",
    request_body(content = AnalyzeMenuForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, body = AnalyzeMenuResponse),
        (status = 400, description = "Missing or unreadable image, or invalid preferences", body = ApiErrorResponse),
        (status = 429, description = "LLM quota exhausted", body = ApiErrorResponse),
        (status = 500, description = "LLM credential rejected", body = ApiErrorResponse),
        (status = 502, description = "LLM reply unusable", body = ApiErrorResponse),
    ),
)]
pub async fn analyze_menu(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response<AnalyzeMenuResponse>, ApiError> {
    let mut form = PreferencesForm::default();
    let mut image: Option<MenuImage> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read multipart field: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "image" => {
                let mime_type = field.content_type().unwrap_or("").to_string();

                let data = field.bytes().await.map_err(|e| {
                    error!("Failed to read image upload: {}", e);
                    AnalysisError::Encoding {
                        reason: e.to_string(),
                    }
                })?;

                // Browsers send an empty part when no file was picked
                if data.is_empty() {
                    continue;
                }

                if !is_image_mime(&mime_type) {
                    warn!(mime_type = %mime_type, "Rejected non-image upload");
                    return Err(ApiError::BadRequest(format!(
                        "Unsupported file type '{}'. Please upload an image.",
                        mime_type
                    )));
                }

                if data.len() > MAX_IMAGE_SIZE {
                    return Err(ApiError::BadRequest(format!(
                        "Image too large. Max size is {} bytes",
                        MAX_IMAGE_SIZE
                    )));
                }

                image = Some(MenuImage::new(data, mime_type));
            }
            "dietary" => form.dietary = read_text(field).await?,
            "budget" => form.budget = read_text(field).await?,
            "mood" => form.mood = read_text(field).await?,
            _ => {}
        }
    }

    form
        .validate()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let result = state
        .service
        .analyze_menu(AnalyzeMenuInput {
            image,
            preferences: form.into(),
        })
        .await
        .map_err(ApiError::from)?;

    let cards = present(&result);

    Ok(Response::OK(AnalyzeMenuResponse {
        data: result,
        cards,
    }))
}

async fn read_text(field: Field<'_>) -> Result<String, ApiError> {
    let name = field.name().unwrap_or("").to_string();
    field
        .text()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read {}: {}", name, e)))
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    };

    use axum::{Json, Router, http::StatusCode, routing::post};
    use axum_test::{
        TestServer,
        multipart::{MultipartForm, Part},
    };
    use clap::Parser;
    use serde_json::{Value, json};

    use super::*;
    use crate::{
        application::http::server::http_server::{router, state},
        args::Args,
    };

    const SPICY_TOFU: &str = r#"{"recommendations":[{"dish":"Spicy Tofu","price":"14.00","reasoning":"vegetarian and spicy","warnings":"","valueScore":8}]}"#;

    #[derive(Clone, Default)]
    struct GeminiStub {
        calls: Arc<AtomicUsize>,
        prompts: Arc<Mutex<Vec<String>>>,
    }

    impl GeminiStub {
        async fn spawn(self, status: StatusCode, body: Value) -> String {
            let stub = self.clone();
            let app = Router::new().route(
                "/models/gemini-test:generateContent",
                post(move |Json(request): Json<Value>| {
                    let stub = stub.clone();
                    let body = body.clone();
                    async move {
                        stub.calls.fetch_add(1, Ordering::SeqCst);
                        let prompt = request["contents"][0]["parts"][0]["text"]
                            .as_str()
                            .unwrap_or_default()
                            .to_string();
                        stub.prompts.lock().unwrap().push(prompt);
                        (status, Json(body))
                    }
                }),
            );

            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            tokio::spawn(async move {
                axum::serve(listener, app).await.unwrap();
            });
            format!("http://{addr}")
        }

        async fn replying_text(self, text: &str) -> String {
            self.spawn(
                StatusCode::OK,
                json!({"candidates": [{"content": {"parts": [{"text": text}]}}]}),
            )
            .await
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    async fn test_server(base_url: &str) -> TestServer {
        let args = Args::parse_from([
            "menuwise",
            "--gemini-api-key",
            "test-key",
            "--gemini-model",
            "gemini-test",
            "--gemini-base-url",
            base_url,
            "--min-request-interval-ms",
            "0",
        ]);
        let state = state(Arc::new(args)).await.unwrap();
        TestServer::new(router(state).unwrap()).unwrap()
    }

    fn menu_form() -> MultipartForm {
        MultipartForm::new()
            .add_text("dietary", "vegetarian")
            .add_text("budget", "20")
            .add_text("mood", "spicy")
            .add_part(
                "image",
                Part::bytes(b"\x89PNG fake menu".to_vec())
                    .file_name("menu.png")
                    .mime_type("image/png"),
            )
    }

    #[tokio::test]
    async fn returns_recommendations_and_cards() {
        let stub = GeminiStub::default();
        let base_url = stub.clone().replying_text(SPICY_TOFU).await;
        let server = test_server(&base_url).await;

        let response = server.post("/menu-analysis").multipart(menu_form()).await;

        response.assert_status_ok();
        let body: AnalyzeMenuResponse = response.json();
        assert_eq!(body.data.recommendations.len(), 1);
        assert_eq!(body.data.recommendations[0].dish, "Spicy Tofu");
        assert_eq!(body.data.recommendations[0].value_score.as_i64(), Some(8));
        assert_eq!(body.cards[0].stars, "⭐⭐⭐⭐");
        assert_eq!(body.cards[0].warning, None);

        let prompts = stub.prompts.lock().unwrap();
        assert!(prompts[0].contains("vegetarian"));
        assert!(prompts[0].contains("$20"));
        assert!(prompts[0].contains("spicy"));
    }

    #[tokio::test]
    async fn tolerates_fenced_replies() {
        let stub = GeminiStub::default();
        let base_url = stub
            .clone()
            .replying_text(&format!("```json\n{SPICY_TOFU}\n```"))
            .await;
        let server = test_server(&base_url).await;

        let response = server.post("/menu-analysis").multipart(menu_form()).await;

        response.assert_status_ok();
        let body: AnalyzeMenuResponse = response.json();
        assert_eq!(body.data.recommendations[0].price, "14.00");
    }

    #[tokio::test]
    async fn extreme_value_score_renders_at_most_five_stars() {
        let stub = GeminiStub::default();
        let base_url = stub
            .clone()
            .replying_text(
                r#"{"recommendations":[{"dish":"Tofu","price":"9","reasoning":"r","valueScore":2147483647}]}"#,
            )
            .await;
        let server = test_server(&base_url).await;

        let response = server.post("/menu-analysis").multipart(menu_form()).await;

        response.assert_status_ok();
        let body: AnalyzeMenuResponse = response.json();
        assert_eq!(
            body.data.recommendations[0].value_score.as_i64(),
            Some(2147483647)
        );
        assert_eq!(body.cards[0].stars, "⭐⭐⭐⭐⭐");
    }

    #[tokio::test]
    async fn missing_image_never_reaches_the_model() {
        let stub = GeminiStub::default();
        let base_url = stub.clone().replying_text(SPICY_TOFU).await;
        let server = test_server(&base_url).await;

        let form = MultipartForm::new()
            .add_text("dietary", "vegan")
            .add_part(
                "image",
                Part::bytes(Vec::new())
                    .file_name("")
                    .mime_type("application/octet-stream"),
            );
        let response = server.post("/menu-analysis").multipart(form).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ApiErrorResponse = response.json();
        assert_eq!(body.code, "MISSING_IMAGE");
        assert_eq!(body.message, "Please upload a menu image first!");
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn unparseable_reply_is_a_parse_error() {
        let stub = GeminiStub::default();
        let base_url = stub
            .clone()
            .replying_text("I recommend the tofu!")
            .await;
        let server = test_server(&base_url).await;

        let response = server.post("/menu-analysis").multipart(menu_form()).await;

        response.assert_status(StatusCode::BAD_GATEWAY);
        let body: ApiErrorResponse = response.json();
        assert_eq!(body.code, "PARSE_ERROR");
        assert_eq!(body.message, "Failed to parse AI response. Please try again.");
    }

    #[tokio::test]
    async fn upstream_quota_is_reported_as_rate_limit() {
        let stub = GeminiStub::default();
        let base_url = stub
            .clone()
            .spawn(
                StatusCode::TOO_MANY_REQUESTS,
                json!({"error": {"code": 429, "message": "Quota exceeded", "status": "RESOURCE_EXHAUSTED"}}),
            )
            .await;
        let server = test_server(&base_url).await;

        let response = server.post("/menu-analysis").multipart(menu_form()).await;

        response.assert_status(StatusCode::TOO_MANY_REQUESTS);
        let body: ApiErrorResponse = response.json();
        assert_eq!(
            body.message,
            "Rate limit reached. Please wait 60 seconds and try again."
        );
        assert_eq!(stub.calls(), 1);
    }

    #[tokio::test]
    async fn rejects_non_image_uploads() {
        let stub = GeminiStub::default();
        let base_url = stub.clone().replying_text(SPICY_TOFU).await;
        let server = test_server(&base_url).await;

        let form = MultipartForm::new().add_part(
            "image",
            Part::bytes(b"%PDF-1.7".to_vec())
                .file_name("menu.pdf")
                .mime_type("application/pdf"),
        );
        let response = server.post("/menu-analysis").multipart(form).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn rejects_non_numeric_budget() {
        let stub = GeminiStub::default();
        let base_url = stub.clone().replying_text(SPICY_TOFU).await;
        let server = test_server(&base_url).await;

        let form = menu_form().add_text("budget", "cheap");
        let response = server.post("/menu-analysis").multipart(form).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(stub.calls(), 0);
    }
}

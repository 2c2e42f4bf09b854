use axum::{Router, extract::DefaultBodyLimit, routing::post};
use utoipa::OpenApi;

use super::{
    handlers::analyze_menu::{__path_analyze_menu, analyze_menu},
    validators::MAX_IMAGE_SIZE,
};
use crate::application::http::server::app_state::AppState;

// Room for the image plus the text fields and multipart framing.
const MAX_BODY_SIZE: usize = MAX_IMAGE_SIZE + 64 * 1024;

#[derive(OpenApi)]
#[openapi(paths(analyze_menu))]
pub struct MenuAnalysisApiDoc;

pub fn menu_analysis_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/menu-analysis", state.args.server.root_path),
            post(analyze_menu),
        )
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
}

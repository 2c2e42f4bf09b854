use utoipa::OpenApi;

use crate::application::http::{
    health::__path_health, menu_analysis::router::MenuAnalysisApiDoc,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Menuwise API",
        description = "Upload a photo of a restaurant menu and get dish recommendations"
    ),
    paths(health),
    nest(
        (path = "/menu-analysis", api = MenuAnalysisApiDoc),
    ),
    tags(
        (name = "menu-analysis", description = "LLM-backed menu recommendations"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;

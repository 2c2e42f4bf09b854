use axum::{Router, response::Html, routing::get};

use crate::application::http::server::app_state::AppState;

const INDEX_HTML: &str = include_str!("../../../static/index.html");

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub fn web_routes(root_path: &str) -> Router<AppState> {
    Router::new().route(&format!("{}/", root_path), get(index))
}

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use menuwise_core::domain::menu_analysis::entities::AnalysisError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    pub code: String,
    pub status: u16,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Analysis(err) => match err {
                AnalysisError::MissingImage | AnalysisError::Encoding { .. } => {
                    StatusCode::BAD_REQUEST
                }
                AnalysisError::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
                AnalysisError::Auth => StatusCode::INTERNAL_SERVER_ERROR,
                AnalysisError::Parse { .. } | AnalysisError::Unknown(_) => StatusCode::BAD_GATEWAY,
            },
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::Analysis(err) => err.code(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ApiErrorResponse {
            code: self.code().to_string(),
            status: status.as_u16(),
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

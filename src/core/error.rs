use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::shared::types::ApiResponse;

/// Boundary-layer error type.
///
/// Most failures in this service are handled below the boundary (genre
/// resolution and catalog lookup are total); what reaches here is body
/// validation plus the storage errors the handlers translate themselves.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    fn client_view(&self) -> (StatusCode, String) {
        match self {
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error occurred".to_string(),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.client_view();
        let body = Json(ApiResponse::<()>::error(Some(message)));
        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

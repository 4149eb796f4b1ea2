use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Error envelope returned by the boundary layer (extractor rejections and
/// the rare internal failure). Success payloads use endpoint-specific shapes.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn error(message: Option<String>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message,
        }
    }
}

/// Plain message payload used by the status and favourite-add endpoints
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

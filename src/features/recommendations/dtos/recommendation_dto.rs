use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::genre::Genre;

/// Request body for mood-based recommendations
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MoodRequest {
    /// Free-text description of the desired emotional tone
    pub mood: String,
}

/// Combined recommendation payload
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RecommendResponse {
    pub mood: String,
    pub detected_genre: Genre,
    /// Raw movie records as returned by the catalog service
    #[schema(value_type = Vec<Object>)]
    pub movies: Vec<serde_json::Value>,
}

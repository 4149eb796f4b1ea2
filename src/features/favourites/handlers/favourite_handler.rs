use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::extractor::AppJson;
use crate::features::favourites::dtos::{AddFavouriteRequest, FavouriteResponseDto};
use crate::features::favourites::services::FavouriteService;
use crate::shared::types::MessageResponse;

/// Store a favourite movie
///
/// Returns 200 with an explicit failure message when the insert does not
/// land; storage availability never turns into an error status.
#[utoipa::path(
    post,
    path = "/add-test-favourite",
    request_body = AddFavouriteRequest,
    responses(
        (status = 200, description = "Outcome message", body = MessageResponse),
        (status = 400, description = "Malformed request body"),
    ),
    tag = "favourites"
)]
pub async fn add_test_favourite(
    State(service): State<Arc<FavouriteService>>,
    AppJson(body): AppJson<AddFavouriteRequest>,
) -> Json<MessageResponse> {
    match service.add(&body.movie_id, &body.title, &body.genre).await {
        Ok(()) => Json(MessageResponse {
            message: "Movie added successfully".to_string(),
        }),
        Err(e) => {
            tracing::warn!("Favourite insert failed: {:?}", e);
            Json(MessageResponse {
                message: "Failed to add movie".to_string(),
            })
        }
    }
}

/// List stored favourites
///
/// Returns rows in insertion order, or an empty list on any backend error.
#[utoipa::path(
    get,
    path = "/favourites",
    responses(
        (status = 200, description = "Stored favourites", body = Vec<FavouriteResponseDto>),
    ),
    tag = "favourites"
)]
pub async fn list_favourites(
    State(service): State<Arc<FavouriteService>>,
) -> Json<Vec<FavouriteResponseDto>> {
    match service.list().await {
        Ok(rows) => Json(rows.into_iter().map(Into::into).collect()),
        Err(e) => {
            tracing::warn!("Favourite listing failed: {:?}", e);
            Json(Vec::new())
        }
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::favourites::models::Favourite;

/// Request body for storing a favourite movie.
///
/// The genre is free text here: favourites mirror whatever the client saw,
/// they are not constrained to the resolver vocabulary. Duplicates by
/// movie_id are permitted.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AddFavouriteRequest {
    pub movie_id: String,
    pub title: String,
    pub genre: String,
}

/// Response DTO mirroring the favourites table columns
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FavouriteResponseDto {
    pub id: i64,
    pub movie_id: String,
    pub title: String,
    pub genre: String,
    pub created_at: DateTime<Utc>,
}

impl From<Favourite> for FavouriteResponseDto {
    fn from(f: Favourite) -> Self {
        Self {
            id: f.id,
            movie_id: f.movie_id,
            title: f.title,
            genre: f.genre,
            created_at: f.created_at,
        }
    }
}

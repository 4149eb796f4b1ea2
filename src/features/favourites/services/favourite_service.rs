use sqlx::MySqlPool;

use crate::core::error::{AppError, Result};
use crate::features::favourites::models::Favourite;

/// Append-only store for favourite movies
pub struct FavouriteService {
    pool: MySqlPool,
}

impl FavouriteService {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub async fn add(&self, movie_id: &str, title: &str, genre: &str) -> Result<()> {
        sqlx::query("INSERT INTO favourites (movie_id, title, genre) VALUES (?, ?, ?)")
            .bind(movie_id)
            .bind(title)
            .bind(genre)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to insert favourite: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(())
    }

    /// List stored favourites in insertion order
    pub async fn list(&self) -> Result<Vec<Favourite>> {
        sqlx::query_as::<_, Favourite>(
            "SELECT id, movie_id, title, genre, created_at FROM favourites ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list favourites: {:?}", e);
            AppError::Database(e)
        })
    }
}

use sqlx::MySqlPool;

use crate::core::error::{AppError, Result};
use crate::shared::genre::Genre;

/// Append-only store for recommendation searches.
///
/// Callers decide what a failed insert means; the recommend handler logs it
/// and returns the movie data regardless.
pub struct HistoryService {
    pool: MySqlPool,
}

impl HistoryService {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub async fn record_search(&self, mood: &str, detected_genre: Genre) -> Result<()> {
        sqlx::query("INSERT INTO search_history (mood, detected_genre) VALUES (?, ?)")
            .bind(mood)
            .bind(detected_genre.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to insert search history: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(())
    }
}

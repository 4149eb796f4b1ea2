use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for a favourite movie
#[derive(Debug, Clone, FromRow)]
pub struct Favourite {
    pub id: i64,
    pub movie_id: String,
    pub title: String,
    pub genre: String,
    pub created_at: DateTime<Utc>,
}

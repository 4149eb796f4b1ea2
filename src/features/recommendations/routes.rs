use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::history::HistoryService;
use crate::features::recommendations::handlers::{self, RecommendationState};
use crate::features::recommendations::services::{CatalogService, GenreResolverService};

/// Create routes for the recommendations feature
pub fn routes(
    genre_resolver: Arc<GenreResolverService>,
    catalog_service: Arc<CatalogService>,
    history_service: Arc<HistoryService>,
) -> Router {
    let state = RecommendationState {
        genre_resolver,
        catalog_service,
        history_service,
    };

    Router::new()
        .route("/", get(handlers::root))
        .route("/recommend", post(handlers::recommend))
        .with_state(state)
}

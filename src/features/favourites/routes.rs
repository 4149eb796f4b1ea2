use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::favourites::handlers;
use crate::features::favourites::services::FavouriteService;

/// Create routes for the favourites feature
pub fn routes(service: Arc<FavouriteService>) -> Router {
    Router::new()
        .route("/add-test-favourite", post(handlers::add_test_favourite))
        .route("/favourites", get(handlers::list_favourites))
        .with_state(service)
}

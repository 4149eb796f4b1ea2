use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::extractor::AppJson;
use crate::features::history::HistoryService;
use crate::features::recommendations::dtos::{MoodRequest, RecommendResponse};
use crate::features::recommendations::services::{CatalogService, GenreResolverService};
use crate::shared::types::MessageResponse;

#[derive(Clone)]
pub struct RecommendationState {
    pub genre_resolver: Arc<GenreResolverService>,
    pub catalog_service: Arc<CatalogService>,
    pub history_service: Arc<HistoryService>,
}

/// Service status message
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service is running", body = MessageResponse),
    ),
    tag = "recommendations"
)]
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Movie Recommendation API is running with MySQL".to_string(),
    })
}

/// Recommend movies for a mood
///
/// Resolves the mood to a genre, fetches matching movies and records the
/// search. Upstream failures are absorbed: the response is always 200 with
/// a valid genre and a possibly empty movie list.
#[utoipa::path(
    post,
    path = "/recommend",
    request_body = MoodRequest,
    responses(
        (status = 200, description = "Recommendations for the mood", body = RecommendResponse),
        (status = 400, description = "Malformed request body"),
    ),
    tag = "recommendations"
)]
pub async fn recommend(
    State(state): State<RecommendationState>,
    AppJson(body): AppJson<MoodRequest>,
) -> Json<RecommendResponse> {
    let detected_genre = state.genre_resolver.resolve(&body.mood).await;
    let movies = state.catalog_service.discover_by_genre(detected_genre).await;

    // Best effort: the recommendation is returned whether or not the row lands
    if let Err(e) = state
        .history_service
        .record_search(&body.mood, detected_genre)
        .await
    {
        tracing::warn!("Failed to record search history: {:?}", e);
    }

    Json(RecommendResponse {
        mood: body.mood,
        detected_genre,
        movies,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{GeminiConfig, TmdbConfig};
    use crate::core::http::{RetryPolicy, RetryingClient};
    use crate::features::recommendations::routes;
    use crate::shared::test_helpers::{spawn_upstream, unreachable_pool};
    use axum::{
        extract::{Path, RawQuery},
        http::StatusCode,
        routing::{get, post},
        Router,
    };
    use axum_test::TestServer;
    use std::time::Duration;

    async fn spawn_gemini(answer: &'static str) -> String {
        let router = Router::new().route(
            "/v1beta/models/{model_call}",
            post(move |Path(_): Path<String>| async move {
                Json(serde_json::json!({
                    "candidates": [{ "content": { "parts": [{ "text": answer }] } }]
                }))
            }),
        );
        spawn_upstream(router).await
    }

    async fn spawn_tmdb() -> String {
        // Only genre id 35 has movies; anything else comes back empty
        let router = Router::new().route(
            "/discover/movie",
            get(|RawQuery(query): RawQuery| async move {
                let query = query.unwrap_or_default();
                if query.contains("with_genres=35") {
                    Json(serde_json::json!({
                        "results": [{ "id": 19, "title": "Airplane!" }]
                    }))
                } else {
                    Json(serde_json::json!({ "results": [] }))
                }
            }),
        );
        spawn_upstream(router).await
    }

    async fn test_server(gemini_base: String, tmdb_base: String) -> TestServer {
        let http = RetryingClient::new(RetryPolicy {
            max_attempts: 3,
            backoff_base: Duration::from_millis(5),
        });
        let genre_resolver = Arc::new(GenreResolverService::new(
            http.clone(),
            GeminiConfig {
                api_key: Some("test-key".to_string()),
                model: "gemini-2.0-flash".to_string(),
                base_url: gemini_base,
            },
        ));
        let catalog_service = Arc::new(CatalogService::new(
            http,
            TmdbConfig {
                api_key: Some("tmdb-key".to_string()),
                base_url: tmdb_base,
            },
        ));
        let history_service = Arc::new(HistoryService::new(unreachable_pool()));

        TestServer::new(routes::routes(
            genre_resolver,
            catalog_service,
            history_service,
        ))
        .unwrap()
    }

    #[tokio::test]
    async fn recommend_returns_genre_and_movies() {
        let gemini = spawn_gemini("Comedy").await;
        let tmdb = spawn_tmdb().await;
        let server = test_server(gemini, tmdb).await;

        let response = server
            .post("/recommend")
            .json(&serde_json::json!({ "mood": "I want to laugh" }))
            .await;

        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["mood"], "I want to laugh");
        assert_eq!(body["detected_genre"], "Comedy");
        assert_eq!(
            body["movies"],
            serde_json::json!([{ "id": 19, "title": "Airplane!" }])
        );
    }

    #[tokio::test]
    async fn unmappable_answer_falls_back_to_drama() {
        let gemini = spawn_gemini("banana").await;
        let tmdb = spawn_tmdb().await;
        let server = test_server(gemini, tmdb).await;

        let response = server
            .post("/recommend")
            .json(&serde_json::json!({ "mood": "whatever" }))
            .await;

        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["detected_genre"], "Drama");
        assert_eq!(body["movies"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn malformed_body_is_rejected_at_the_boundary() {
        let gemini = spawn_gemini("Comedy").await;
        let tmdb = spawn_tmdb().await;
        let server = test_server(gemini, tmdb).await;

        let response = server
            .post("/recommend")
            .json(&serde_json::json!({ "feeling": "happy" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn root_reports_service_status() {
        let gemini = spawn_gemini("Comedy").await;
        let tmdb = spawn_tmdb().await;
        let server = test_server(gemini, tmdb).await;

        let response = server.get("/").await;

        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(
            body["message"],
            "Movie Recommendation API is running with MySQL"
        );
    }
}

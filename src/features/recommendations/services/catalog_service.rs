use serde::Deserialize;

use crate::core::config::TmdbConfig;
use crate::core::http::RetryingClient;
use crate::shared::genre::Genre;

/// TMDB discover response; individual movie records pass through untouched
#[derive(Debug, Deserialize)]
struct DiscoverResponse {
    #[serde(default)]
    results: Vec<serde_json::Value>,
}

/// Service fetching movies for a genre from the TMDB discover endpoint.
///
/// Lookup never fails outward: configuration absence, transport errors and
/// upstream failures all degrade to an empty result list.
pub struct CatalogService {
    http: RetryingClient,
    config: TmdbConfig,
}

impl CatalogService {
    pub fn new(http: RetryingClient, config: TmdbConfig) -> Self {
        Self { http, config }
    }

    pub async fn discover_by_genre(&self, genre: Genre) -> Vec<serde_json::Value> {
        let Some(api_key) = self.config.api_key.as_deref() else {
            tracing::warn!("TMDB API key not configured, returning no movies");
            return Vec::new();
        };

        let params = [
            ("api_key", api_key.to_string()),
            ("with_genres", genre.tmdb_id().to_string()),
        ];

        let query_string = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        let url = format!("{}/discover/movie?{}", self.config.base_url, query_string);

        let response = match self.http.get(&url).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("TMDB request failed: {}", e);
                return Vec::new();
            }
        };

        if !response.status().is_success() {
            tracing::warn!("TMDB returned status: {}", response.status());
            return Vec::new();
        }

        match response.json::<DiscoverResponse>().await {
            Ok(body) => body.results,
            Err(e) => {
                tracing::warn!("Failed to decode TMDB response: {}", e);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::http::RetryPolicy;
    use crate::shared::test_helpers::spawn_upstream;
    use axum::{
        extract::{RawQuery, State},
        http::StatusCode,
        routing::get,
        Json, Router,
    };
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    #[derive(Clone)]
    struct FakeTmdb {
        calls: Arc<AtomicUsize>,
        last_query: Arc<Mutex<Option<String>>>,
        status: StatusCode,
        body: serde_json::Value,
    }

    async fn discover(
        State(fake): State<FakeTmdb>,
        RawQuery(query): RawQuery,
    ) -> (StatusCode, Json<serde_json::Value>) {
        fake.calls.fetch_add(1, Ordering::SeqCst);
        *fake.last_query.lock().unwrap() = query;
        (fake.status, Json(fake.body.clone()))
    }

    async fn spawn_tmdb(fake: FakeTmdb) -> String {
        let router = Router::new()
            .route("/discover/movie", get(discover))
            .with_state(fake);
        spawn_upstream(router).await
    }

    fn service(base_url: String) -> CatalogService {
        CatalogService::new(
            RetryingClient::new(RetryPolicy {
                max_attempts: 3,
                backoff_base: Duration::from_millis(5),
            }),
            TmdbConfig {
                api_key: Some("tmdb-key".to_string()),
                base_url,
            },
        )
    }

    #[tokio::test]
    async fn passes_genre_id_and_returns_results() {
        let last_query = Arc::new(Mutex::new(None));
        let movies = serde_json::json!([
            { "id": 1, "title": "Airplane!" },
            { "id": 2, "title": "The Naked Gun" }
        ]);
        let base = spawn_tmdb(FakeTmdb {
            calls: Arc::new(AtomicUsize::new(0)),
            last_query: last_query.clone(),
            status: StatusCode::OK,
            body: serde_json::json!({ "results": movies.clone() }),
        })
        .await;

        let results = service(base).discover_by_genre(Genre::Comedy).await;

        assert_eq!(serde_json::Value::Array(results), movies);
        let query = last_query.lock().unwrap().clone().unwrap();
        assert!(query.contains("with_genres=35"), "query: {}", query);
        assert!(query.contains("api_key=tmdb-key"), "query: {}", query);
    }

    #[tokio::test]
    async fn upstream_error_yields_empty_results() {
        let calls = Arc::new(AtomicUsize::new(0));
        let base = spawn_tmdb(FakeTmdb {
            calls: calls.clone(),
            last_query: Arc::new(Mutex::new(None)),
            status: StatusCode::UNAUTHORIZED,
            body: serde_json::json!({ "status_message": "Invalid API key" }),
        })
        .await;

        let results = service(base).discover_by_genre(Genre::Horror).await;

        assert!(results.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn server_errors_are_retried_then_yield_empty() {
        let calls = Arc::new(AtomicUsize::new(0));
        let base = spawn_tmdb(FakeTmdb {
            calls: calls.clone(),
            last_query: Arc::new(Mutex::new(None)),
            status: StatusCode::SERVICE_UNAVAILABLE,
            body: serde_json::json!({}),
        })
        .await;

        let results = service(base).discover_by_genre(Genre::Drama).await;

        assert!(results.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn missing_results_field_yields_empty() {
        let base = spawn_tmdb(FakeTmdb {
            calls: Arc::new(AtomicUsize::new(0)),
            last_query: Arc::new(Mutex::new(None)),
            status: StatusCode::OK,
            body: serde_json::json!({ "page": 1 }),
        })
        .await;

        let results = service(base).discover_by_genre(Genre::Action).await;

        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn missing_api_key_skips_the_call() {
        let service = CatalogService::new(
            RetryingClient::default(),
            TmdbConfig {
                api_key: None,
                base_url: "http://127.0.0.1:9".to_string(),
            },
        );

        assert!(service.discover_by_genre(Genre::SciFi).await.is_empty());
    }
}

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};

/// Per-request timeout for all outbound calls
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Statuses worth retrying: the upstream may recover within the backoff window
const RETRY_STATUSES: [StatusCode; 4] = [
    StatusCode::INTERNAL_SERVER_ERROR,
    StatusCode::BAD_GATEWAY,
    StatusCode::SERVICE_UNAVAILABLE,
    StatusCode::GATEWAY_TIMEOUT,
];

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff_base: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_base: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    fn should_retry(&self, status: StatusCode) -> bool {
        RETRY_STATUSES.contains(&status)
    }
}

/// reqwest wrapper applying the shared transport retry policy.
///
/// Retries connect/read failures and 500/502/503/504 responses with
/// exponential backoff. Other statuses (including 429 and 404) are returned
/// to the caller untouched; their meaning is integration-specific.
#[derive(Clone)]
pub struct RetryingClient {
    client: Client,
    policy: RetryPolicy,
}

impl RetryingClient {
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("Failed to build HTTP client"),
            policy,
        }
    }

    pub async fn get(&self, url: &str) -> reqwest::Result<Response> {
        self.send_with_retry(|| self.client.get(url)).await
    }

    pub async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> reqwest::Result<Response> {
        self.send_with_retry(|| self.client.post(url).json(body))
            .await
    }

    async fn send_with_retry<F>(&self, make_request: F) -> reqwest::Result<Response>
    where
        F: Fn() -> RequestBuilder,
    {
        let mut backoff = self.policy.backoff_base;
        let mut attempt = 1u32;

        loop {
            let result = make_request().send().await;

            let retryable = match &result {
                Ok(response) => self.policy.should_retry(response.status()),
                Err(error) => error.is_connect() || error.is_timeout(),
            };

            if !retryable || attempt >= self.policy.max_attempts {
                return result;
            }

            match &result {
                Ok(response) => {
                    tracing::warn!(attempt, status = %response.status(), "Retrying after server error")
                }
                Err(error) => tracing::warn!(attempt, %error, "Retrying after transport error"),
            }

            tokio::time::sleep(backoff).await;
            backoff *= 2;
            attempt += 1;
        }
    }
}

impl Default for RetryingClient {
    fn default() -> Self {
        Self::new(RetryPolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::spawn_upstream;
    use axum::{extract::State, routing::get, Router};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn fast_client() -> RetryingClient {
        RetryingClient::new(RetryPolicy {
            max_attempts: 3,
            backoff_base: Duration::from_millis(5),
        })
    }

    async fn flaky(State(state): State<(Arc<AtomicUsize>, u16, usize)>) -> (StatusCode, String) {
        let (calls, failure_status, failures) = state;
        let call = calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call <= failures {
            (StatusCode::from_u16(failure_status).unwrap(), String::new())
        } else {
            (StatusCode::OK, "ok".to_string())
        }
    }

    async fn spawn_flaky(calls: Arc<AtomicUsize>, failure_status: u16, failures: usize) -> String {
        let router = Router::new()
            .route("/", get(flaky))
            .with_state((calls, failure_status, failures));
        spawn_upstream(router).await
    }

    #[tokio::test]
    async fn retries_server_errors_until_success() {
        let calls = Arc::new(AtomicUsize::new(0));
        let base = spawn_flaky(calls.clone(), 503, 2).await;

        let response = fast_client().get(&base).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.text().await.unwrap(), "ok");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn gives_up_after_retry_budget() {
        let calls = Arc::new(AtomicUsize::new(0));
        let base = spawn_flaky(calls.clone(), 502, 100).await;

        let response = fast_client().get(&base).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn does_not_retry_client_errors() {
        let calls = Arc::new(AtomicUsize::new(0));
        let base = spawn_flaky(calls.clone(), 404, 100).await;

        let response = fast_client().get(&base).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}

use reqwest::StatusCode;

use crate::core::config::GeminiConfig;
use crate::core::http::RetryingClient;
use crate::shared::genre::{normalize_genre, Genre};
use crate::shared::prompts::render_genre_detection_prompt;

/// Models attempted after the configured one, in order. The configured model
/// is not deduplicated against this list: a preferred model equal to a
/// fallback gets a second attempt.
const FALLBACK_MODELS: [&str; 2] = ["gemini-2.0-flash", "gemini-1.5-flash"];

/// Service resolving a free-text mood to a [`Genre`] via the generation API.
///
/// Resolution is total. Transport retry runs per call, model substitution
/// runs across calls, and [`Genre::Drama`] is the outer default, so the
/// caller always receives a usable genre.
pub struct GenreResolverService {
    http: RetryingClient,
    config: GeminiConfig,
}

impl GenreResolverService {
    pub fn new(http: RetryingClient, config: GeminiConfig) -> Self {
        Self { http, config }
    }

    pub async fn resolve(&self, mood: &str) -> Genre {
        let Some(api_key) = self.config.api_key.as_deref() else {
            tracing::warn!("Gemini API key not configured, defaulting to {}", Genre::Drama);
            return Genre::Drama;
        };

        let prompt = match render_genre_detection_prompt(mood) {
            Ok(prompt) => prompt,
            Err(e) => {
                tracing::error!("Failed to render genre detection prompt: {}", e);
                return Genre::Drama;
            }
        };

        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let models = [
            self.config.model.as_str(),
            FALLBACK_MODELS[0],
            FALLBACK_MODELS[1],
        ];

        for model in models {
            let url = format!(
                "{}/v1beta/models/{}:generateContent?key={}",
                self.config.base_url,
                model,
                urlencoding::encode(api_key)
            );

            let response = match self.http.post_json(&url, &body).await {
                Ok(response) => response,
                Err(e) => {
                    tracing::warn!("Gemini request failed ({}): {}", model, e);
                    continue;
                }
            };

            let status = response.status();

            if status == StatusCode::TOO_MANY_REQUESTS {
                // Quota exhaustion: substituting models would burn it further
                tracing::warn!("Gemini rate limited (429), defaulting to {}", Genre::Drama);
                return Genre::Drama;
            }

            if status == StatusCode::NOT_FOUND {
                tracing::warn!("Gemini model not found: {}", model);
                continue;
            }

            if !status.is_success() {
                tracing::warn!("Gemini returned status {} for model {}", status, model);
                continue;
            }

            let payload: serde_json::Value = match response.json().await {
                Ok(payload) => payload,
                Err(e) => {
                    tracing::warn!("Failed to decode Gemini response ({}): {}", model, e);
                    continue;
                }
            };

            if payload.get("candidates").is_none() {
                tracing::warn!("Gemini response has no candidates: {}", payload);
                return Genre::Drama;
            }

            let Some(answer) = payload["candidates"][0]["content"]["parts"][0]["text"].as_str()
            else {
                tracing::warn!("Gemini candidate content malformed ({})", model);
                continue;
            };

            let answer = answer.trim();
            match normalize_genre(answer) {
                Some(genre) => return genre,
                None => {
                    tracing::warn!(
                        "Gemini returned unmappable genre {:?}, defaulting to {}",
                        answer,
                        Genre::Drama
                    );
                    return Genre::Drama;
                }
            }
        }

        Genre::Drama
    }
}

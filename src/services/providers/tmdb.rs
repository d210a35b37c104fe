/// TMDB (The Movie Database) v3 provider
///
/// API Flow:
/// 1. Title Search: /search/movie?query=... → page of matching movies
///
/// Only the first page of results is requested.
use crate::{
    error::{AppError, AppResult},
    models::{Movie, TmdbMovie},
    services::providers::MovieSearchProvider,
};
use reqwest::Client as HttpClient;
use std::time::Duration;
use tracing::instrument;

const MAX_STATUS_MESSAGE_CHARS: usize = 120;

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    language: String,
}

impl TmdbProvider {
    /// Creates a new TMDB provider whose requests give up after `timeout`
    pub fn new(
        api_key: String,
        api_url: String,
        language: String,
        timeout: Duration,
    ) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url,
            language,
        })
    }

    /// Error for a non-2xx response
    ///
    /// Only TMDB's own `status_message` is kept, capped in length; the raw body
    /// never reaches the user.
    fn status_error(status: reqwest::StatusCode, body: &str) -> AppError {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|value| value["status_message"].as_str().map(str::to_string))
            .map(|message| message.chars().take(MAX_STATUS_MESSAGE_CHARS).collect::<String>());

        match message {
            Some(message) => {
                AppError::ExternalApi(format!("TMDB returned status {}: {}", status, message))
            }
            None => AppError::ExternalApi(format!("TMDB returned status {}", status)),
        }
    }

    /// Parses a `/search/movie` response body
    ///
    /// Entries that fail to deserialize are skipped rather than failing the
    /// whole search.
    fn parse_search_response(body: &str) -> AppResult<Vec<Movie>> {
        let value: serde_json::Value = serde_json::from_str(body).map_err(|e| {
            AppError::ExternalApi(format!("Failed to parse TMDB response: {}", e))
        })?;

        let results = value["results"].as_array().ok_or_else(|| {
            AppError::ExternalApi("Invalid TMDB response format".to_string())
        })?;

        let movies = results
            .iter()
            .filter_map(|result| match serde_json::from_value::<TmdbMovie>(result.clone()) {
                Ok(raw) => Some(Movie::from(raw)),
                Err(e) => {
                    tracing::debug!(error = %e, "Skipping malformed TMDB search result");
                    None
                }
            })
            .collect();

        Ok(movies)
    }
}

#[async_trait::async_trait]
impl MovieSearchProvider for TmdbProvider {
    #[instrument(skip(self), fields(provider = "tmdb"))]
    async fn search_movies(&self, query: &str) -> AppResult<Vec<Movie>> {
        if query.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }

        let url = format!("{}/search/movie", self.api_url.trim_end_matches('/'));

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("query", query),
                ("language", self.language.as_str()),
                ("include_adult", "false"),
                ("page", "1"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(status = %status, body_len = body.len(), "TMDB search rejected");
            return Err(Self::status_error(status, &body));
        }

        let body = response.text().await?;
        let movies = Self::parse_search_response(&body)?;

        tracing::info!(
            query = %query,
            results = movies.len(),
            provider = "tmdb",
            "Movie search completed"
        );

        Ok(movies)
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}

use std::sync::Arc;

use crate::{models::Movie, services::providers::MovieSearchProvider};

/// Result of one search, delivered exactly once per call
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// The lookup succeeded; may be empty when nothing matched
    Found(Vec<Movie>),
    /// The lookup failed with a human-readable message
    Failed(String),
}

/// Runs provider lookups off the caller's task
#[derive(Clone)]
pub struct SearchClient {
    provider: Arc<dyn MovieSearchProvider>,
}

impl SearchClient {
    pub fn new(provider: Arc<dyn MovieSearchProvider>) -> Self {
        Self { provider }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Starts a search and returns immediately
    ///
    /// `on_complete` runs exactly once on a runtime worker, never on the
    /// caller's task. Callers that own non-`Send` state must post the outcome
    /// back to their own queue from inside it.
    pub fn search<F>(&self, query: String, on_complete: F)
    where
        F: FnOnce(SearchOutcome) + Send + 'static,
    {
        let provider = self.provider.clone();

        tokio::spawn(async move {
            let provider_name = provider.name();
            let lookup = tokio::spawn(async move { provider.search_movies(&query).await });

            let outcome = match lookup.await {
                Ok(Ok(movies)) => SearchOutcome::Found(movies),
                Ok(Err(e)) => SearchOutcome::Failed(e.to_string()),
                Err(e) => {
                    tracing::error!(error = %e, provider = provider_name, "Search task join error");
                    SearchOutcome::Failed(e.to_string())
                }
            };

            on_complete(outcome);
        });
    }
}

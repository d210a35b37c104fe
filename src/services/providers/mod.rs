/// Movie search provider abstraction
///
/// A provider performs the remote title lookup behind the search client. Only
/// TMDB is implemented; the trait keeps the screen testable without a network.
use crate::{error::AppResult, models::Movie};

pub mod tmdb;

pub use tmdb::TmdbProvider;

/// Trait for remote movie search backends
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MovieSearchProvider: Send + Sync {
    /// Search for movies by title
    ///
    /// An empty result is a successful search with no matches, not an error.
    async fn search_movies(&self, query: &str) -> AppResult<Vec<Movie>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

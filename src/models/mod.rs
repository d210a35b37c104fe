use serde::Deserialize;

pub mod movie;

pub use movie::Movie;

// ============================================================================
// TMDB API Types
// ============================================================================

/// Raw search result from TMDB `GET /search/movie`
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovie {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
}

impl From<TmdbMovie> for Movie {
    fn from(raw: TmdbMovie) -> Self {
        // TMDB sends "" for unknown text fields
        let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

        Movie {
            id: raw.id,
            title: raw.title,
            overview: non_empty(raw.overview),
            poster_path: non_empty(raw.poster_path),
            release_date: non_empty(raw.release_date),
            vote_average: raw.vote_average,
        }
    }
}

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A movie returned by a title search
///
/// Carries everything needed to render a list row and to hand the record to
/// the details screen by value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    /// TMDB movie ID
    pub id: u64,
    pub title: String,
    pub overview: Option<String>,
    /// Poster path relative to the image base URL (e.g. "/f89U3ADr1oiB1s9GkdPOEpXUk5H.jpg")
    pub poster_path: Option<String>,
    /// Release date as reported by the API, "YYYY-MM-DD"
    pub release_date: Option<String>,
    pub vote_average: Option<f64>,
}

impl Movie {
    /// Creates a movie with only an ID and a title
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            overview: None,
            poster_path: None,
            release_date: None,
            vote_average: None,
        }
    }

    /// Parsed release date, `None` when absent or malformed
    pub fn release(&self) -> Option<NaiveDate> {
        self.release_date
            .as_deref()
            .and_then(|date| NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok())
    }

    pub fn release_year(&self) -> Option<i32> {
        self.release().map(|date| date.year())
    }

    /// Full poster URL under the given image base URL
    pub fn poster_url(&self, image_base_url: &str) -> Option<String> {
        self.poster_path
            .as_deref()
            .filter(|path| !path.is_empty())
            .map(|path| format!("{}{}", image_base_url.trim_end_matches('/'), path))
    }
}

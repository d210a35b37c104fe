//! Effects the search screen publishes to whatever front end presents it.

use std::fmt::Display;

use crate::models::Movie;

/// Transient user-facing messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    EmptyQuery,
    NoConnection,
    NoResults,
    FetchError(String),
}

impl Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notice::EmptyQuery => write!(f, "Please enter a search query."),
            Notice::NoConnection => write!(f, "No internet connection available."),
            Notice::NoResults => write!(f, "No movies found for the given query."),
            Notice::FetchError(message) => write!(f, "Error fetching movies: {}", message),
        }
    }
}

/// Screens reachable from the search screen
#[derive(Debug, Clone, PartialEq)]
pub enum Destination {
    /// Details for one movie, passed by value
    Details(Movie),
    Favorites,
}

/// One bound list row
#[derive(Debug, Clone, PartialEq)]
pub struct MovieRow {
    pub position: usize,
    pub title: String,
    pub year: Option<i32>,
    pub rating: Option<f64>,
}

impl From<(usize, &Movie)> for MovieRow {
    fn from((position, movie): (usize, &Movie)) -> Self {
        Self {
            position,
            title: movie.title.clone(),
            year: movie.release_year(),
            rating: movie.vote_average,
        }
    }
}

impl Display for MovieRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:>3}. {}", self.position + 1, self.title)?;
        if let Some(year) = self.year {
            write!(f, " ({})", year)?;
        }
        if let Some(rating) = self.rating {
            write!(f, "  * {:.1}", rating)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UiEffect {
    /// Full re-render of the result list
    Render(Vec<MovieRow>),
    Notice(Notice),
    Navigate(Destination),
}

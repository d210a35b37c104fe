//! Line-oriented terminal front end for the search screen.
//!
//! Input lines become [`ScreenEvent`](crate::screen::ScreenEvent)s and
//! [`UiEffect`]s become printed text.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;

use crate::{
    error::{AppError, AppResult},
    models::Movie,
    screen::{Destination, ScreenHandle, UiEffect},
};

pub const HELP: &str = "\
Type a title and press enter to search.
  :open N   show details for result N
  :fav      view favorites
  :help     show this help
  :q        quit
Start a search with '::' to look up a title beginning with ':'.";

/// One line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search(String),
    /// Zero-based row position
    Open(usize),
    Favorites,
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if let Some(literal) = trimmed.strip_prefix("::") {
            return Command::Search(format!(":{}", literal));
        }
        let Some(directive) = trimmed.strip_prefix(':') else {
            // Whitespace is left for the screen to trim
            return Command::Search(line.to_string());
        };

        let mut parts = directive.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some("open" | "o"), Some(n), None) => match n.parse::<usize>() {
                Ok(n) if n >= 1 => Command::Open(n - 1),
                _ => Command::Unknown(trimmed.to_string()),
            },
            (Some("fav" | "favorites"), None, None) => Command::Favorites,
            (Some("help" | "h"), None, None) => Command::Help,
            (Some("q" | "quit"), None, None) => Command::Quit,
            _ => Command::Unknown(trimmed.to_string()),
        }
    }
}

/// Reads commands until quit or end of input, forwarding them to the screen
///
/// Closes the screen on exit, including when reading fails.
pub async fn read_commands<R, W>(reader: R, mut out: W, handle: ScreenHandle) -> AppResult<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let result = forward_commands(reader, &mut out, &handle).await;
    tracing::debug!("Input closed");
    result.and(handle.close())
}

async fn forward_commands<R, W>(reader: R, out: &mut W, handle: &ScreenHandle) -> AppResult<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();

    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|e| AppError::Internal(format!("Failed to read input: {}", e)))?
    {
        match Command::parse(&line) {
            Command::Search(query) => handle.search(query)?,
            Command::Open(position) => handle.tap(position)?,
            Command::Favorites => handle.view_favorites()?,
            Command::Help => write_line(out, HELP).await?,
            Command::Quit => break,
            Command::Unknown(input) => {
                write_line(out, &format!("Unknown command: {}\n{}", input, HELP)).await?
            }
        }
    }

    Ok(())
}

/// Formats screen effects as terminal text
#[derive(Debug, Clone)]
pub struct ConsoleView {
    image_base_url: String,
}

impl ConsoleView {
    pub fn new(image_base_url: impl Into<String>) -> Self {
        Self {
            image_base_url: image_base_url.into(),
        }
    }

    pub fn render(&self, effect: &UiEffect) -> String {
        match effect {
            UiEffect::Render(rows) => rows
                .iter()
                .map(|row| row.to_string())
                .collect::<Vec<_>>()
                .join("\n"),
            UiEffect::Notice(notice) => format!("! {}", notice),
            UiEffect::Navigate(Destination::Details(movie)) => self.details_card(movie),
            UiEffect::Navigate(Destination::Favorites) => "== Favorites ==".to_string(),
        }
    }

    fn details_card(&self, movie: &Movie) -> String {
        let mut card = match movie.release_year() {
            Some(year) => format!("== {} ({}) ==", movie.title, year),
            None => format!("== {} ==", movie.title),
        };

        if let Some(date) = movie.release() {
            card.push_str(&format!("\nReleased: {}", date.format("%B %-d, %Y")));
        }
        if let Some(rating) = movie.vote_average {
            card.push_str(&format!("\nRating:   {:.1}/10", rating));
        }
        if let Some(poster) = movie.poster_url(&self.image_base_url) {
            card.push_str(&format!("\nPoster:   {}", poster));
        }
        if let Some(overview) = &movie.overview {
            card.push_str(&format!("\n\n{}", overview));
        }

        card
    }

    /// Prints effects until the screen drops its sender
    pub async fn present<W>(
        self,
        mut effects: mpsc::UnboundedReceiver<UiEffect>,
        mut out: W,
    ) -> AppResult<()>
    where
        W: AsyncWrite + Unpin,
    {
        while let Some(effect) = effects.recv().await {
            write_line(&mut out, &self.render(&effect)).await?;
        }
        Ok(())
    }
}

async fn write_line<W: AsyncWrite + Unpin>(out: &mut W, text: &str) -> AppResult<()> {
    let io = |e: std::io::Error| AppError::Internal(format!("Failed to write output: {}", e));
    out.write_all(text.as_bytes()).await.map_err(io)?;
    out.write_all(b"\n").await.map_err(io)?;
    out.flush().await.map_err(io)
}

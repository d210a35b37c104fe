use std::cell::RefCell;
use std::ops::ControlFlow;
use std::rc::Rc;
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::{
    error::{AppError, AppResult},
    models::Movie,
    services::{Connectivity, SearchClient, SearchOutcome},
};

use super::{
    adapter::{ListAdapter, MovieListAdapter, ResultSequence},
    effects::{Destination, Notice, UiEffect},
    request_id::RequestId,
};

/// Everything the search screen reacts to, processed one at a time
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenEvent {
    /// The search action with the raw contents of the query field
    Search(String),
    /// Connectivity probe result for an accepted search
    ConnectivityChecked {
        request: RequestId,
        query: String,
        online: bool,
    },
    /// A tap on a list row
    Tap(usize),
    ViewFavorites,
    /// A search client completion, re-posted onto the screen's queue
    SearchCompleted {
        request: RequestId,
        outcome: SearchOutcome,
    },
    Close,
}

/// Cloneable, `Send` entry point into a running screen
#[derive(Clone, Debug)]
pub struct ScreenHandle {
    events: mpsc::UnboundedSender<ScreenEvent>,
}

impl ScreenHandle {
    /// Wraps a raw event sender, for front ends driven without a screen
    pub fn from_sender(events: mpsc::UnboundedSender<ScreenEvent>) -> Self {
        Self { events }
    }

    pub fn send(&self, event: ScreenEvent) -> AppResult<()> {
        self.events
            .send(event)
            .map_err(|_| AppError::Internal("Search screen is no longer running".to_string()))
    }

    pub fn search(&self, query: impl Into<String>) -> AppResult<()> {
        self.send(ScreenEvent::Search(query.into()))
    }

    pub fn tap(&self, position: usize) -> AppResult<()> {
        self.send(ScreenEvent::Tap(position))
    }

    pub fn view_favorites(&self) -> AppResult<()> {
        self.send(ScreenEvent::ViewFavorites)
    }

    pub fn close(&self) -> AppResult<()> {
        self.send(ScreenEvent::Close)
    }
}

/// The movie search screen
///
/// Owns the result list and its adapter. All state changes happen inside
/// [`SearchScreen::handle_event`], driven from a single task. Connectivity
/// probes and search completions come back through the same queue as user
/// input, so the screen task itself never waits on the network.
pub struct SearchScreen {
    results: ResultSequence,
    adapter: MovieListAdapter,
    client: SearchClient,
    connectivity: Arc<dyn Connectivity>,
    effects: mpsc::UnboundedSender<UiEffect>,
    events_tx: mpsc::UnboundedSender<ScreenEvent>,
    events_rx: mpsc::UnboundedReceiver<ScreenEvent>,
    latest_request: Option<RequestId>,
}

impl SearchScreen {
    pub fn new(
        client: SearchClient,
        connectivity: Arc<dyn Connectivity>,
        effects: mpsc::UnboundedSender<UiEffect>,
    ) -> Self {
        let results: ResultSequence = Rc::new(RefCell::new(Vec::new()));
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        let navigate = effects.clone();
        let adapter = MovieListAdapter::new(results.clone(), effects.clone(), move |movie| {
            tracing::info!(movie_id = movie.id, title = %movie.title, "Opening movie details");
            let _ = navigate.send(UiEffect::Navigate(Destination::Details(movie.clone())));
        });

        Self {
            results,
            adapter,
            client,
            connectivity,
            effects,
            events_tx,
            events_rx,
            latest_request: None,
        }
    }

    pub fn handle(&self) -> ScreenHandle {
        ScreenHandle {
            events: self.events_tx.clone(),
        }
    }

    /// Snapshot of the current result list
    pub fn results(&self) -> Vec<Movie> {
        self.results.borrow().clone()
    }

    pub fn adapter(&self) -> &MovieListAdapter {
        &self.adapter
    }

    /// Processes events until a `Close` arrives
    pub async fn run(mut self) {
        tracing::info!(provider = self.client.provider_name(), "Search screen started");
        while self.process_next().await.is_continue() {}
        tracing::info!("Search screen closed");
    }

    /// Waits for the next queued event and handles it
    pub async fn process_next(&mut self) -> ControlFlow<()> {
        match self.events_rx.recv().await {
            Some(event) => self.handle_event(event),
            None => ControlFlow::Break(()),
        }
    }

    /// Applies one event; never waits on I/O
    pub fn handle_event(&mut self, event: ScreenEvent) -> ControlFlow<()> {
        match event {
            ScreenEvent::Search(query) => self.on_search(&query),
            ScreenEvent::ConnectivityChecked {
                request,
                query,
                online,
            } => self.on_connectivity_checked(request, query, online),
            ScreenEvent::Tap(position) => {
                self.adapter.on_row_tap(position);
            }
            ScreenEvent::ViewFavorites => {
                tracing::info!("Opening favorites");
                self.emit(UiEffect::Navigate(Destination::Favorites));
            }
            ScreenEvent::SearchCompleted { request, outcome } => {
                self.on_search_completed(request, outcome)
            }
            ScreenEvent::Close => return ControlFlow::Break(()),
        }
        ControlFlow::Continue(())
    }

    fn on_search(&mut self, raw_query: &str) {
        let query = raw_query.trim();
        if query.is_empty() {
            self.notify(Notice::EmptyQuery);
            return;
        }

        let request = RequestId::new();
        if let Some(previous) = self.latest_request.replace(request) {
            tracing::debug!(request_id = %previous, "Superseding in-flight search");
        }

        // The probe may touch the network, so it reports back through the queue
        let connectivity = self.connectivity.clone();
        let events = self.events_tx.clone();
        let query = query.to_string();
        tokio::spawn(async move {
            let online = connectivity.is_network_available().await;
            let _ = events.send(ScreenEvent::ConnectivityChecked {
                request,
                query,
                online,
            });
        });
    }

    fn on_connectivity_checked(&mut self, request: RequestId, query: String, online: bool) {
        if self.latest_request != Some(request) {
            tracing::debug!(request_id = %request, "Discarding superseded search");
            return;
        }

        if !online {
            self.latest_request = None;
            tracing::warn!(query = %query, "Search skipped, no network");
            self.notify(Notice::NoConnection);
            return;
        }

        tracing::info!(
            request_id = %request,
            query = %query,
            provider = self.client.provider_name(),
            "Dispatching movie search"
        );

        let events = self.events_tx.clone();
        self.client.search(query, move |outcome| {
            let _ = events.send(ScreenEvent::SearchCompleted { request, outcome });
        });
    }

    fn on_search_completed(&mut self, request: RequestId, outcome: SearchOutcome) {
        if self.latest_request != Some(request) {
            tracing::debug!(request_id = %request, "Discarding stale search completion");
            return;
        }
        self.latest_request = None;

        match outcome {
            SearchOutcome::Found(movies) if !movies.is_empty() => {
                tracing::info!(request_id = %request, results = movies.len(), "Search results received");
                {
                    let mut results = self.results.borrow_mut();
                    results.clear();
                    results.extend(movies);
                }
                self.adapter.notify_data_set_changed();
            }
            SearchOutcome::Found(_) => self.notify(Notice::NoResults),
            SearchOutcome::Failed(message) => {
                tracing::error!(request_id = %request, error = %message, "Movie search failed");
                self.notify(Notice::FetchError(message));
            }
        }
    }

    fn notify(&self, notice: Notice) {
        self.emit(UiEffect::Notice(notice));
    }

    fn emit(&self, effect: UiEffect) {
        if self.effects.send(effect).is_err() {
            tracing::debug!("No front end attached, dropping effect");
        }
    }
}

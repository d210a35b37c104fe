use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use moviedb::{
    error::{AppError, AppResult},
    models::Movie,
    screen::{Destination, ListAdapter, Notice, ScreenEvent, SearchScreen, UiEffect},
    services::{Connectivity, MovieSearchProvider, SearchClient},
};
use tokio::sync::{mpsc, oneshot};

type Reply = AppResult<Vec<Movie>>;

/// Provider whose answers are released by the test, one per query
#[derive(Default)]
struct ScriptedProvider {
    replies: Mutex<HashMap<String, oneshot::Receiver<Reply>>>,
    calls: AtomicUsize,
}

impl ScriptedProvider {
    fn script(&self, query: &str) -> oneshot::Sender<Reply> {
        let (tx, rx) = oneshot::channel();
        self.replies.lock().unwrap().insert(query.to_string(), rx);
        tx
    }

    fn answer(&self, query: &str, reply: Reply) {
        let _ = self.script(query).send(reply);
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl MovieSearchProvider for ScriptedProvider {
    async fn search_movies(&self, query: &str) -> AppResult<Vec<Movie>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let reply = self.replies.lock().unwrap().remove(query);
        match reply {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(AppError::Internal("reply dropped".to_string()))),
            None => Err(AppError::Internal(format!("unscripted query {}", query))),
        }
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

struct FixedConnectivity(bool);

#[async_trait::async_trait]
impl Connectivity for FixedConnectivity {
    async fn is_network_available(&self) -> bool {
        self.0
    }
}

struct Harness {
    screen: SearchScreen,
    provider: Arc<ScriptedProvider>,
    effects: mpsc::UnboundedReceiver<UiEffect>,
}

impl Harness {
    fn new(online: bool) -> Self {
        let provider = Arc::new(ScriptedProvider::default());
        let (effects_tx, effects) = mpsc::unbounded_channel();
        let screen = SearchScreen::new(
            SearchClient::new(provider.clone()),
            Arc::new(FixedConnectivity(online)),
            effects_tx,
        );
        Self {
            screen,
            provider,
            effects,
        }
    }

    /// Submits a query and applies the connectivity check it triggers
    async fn search(&mut self, query: &str) {
        let _ = self
            .screen
            .handle_event(ScreenEvent::Search(query.to_string()));
        if !query.trim().is_empty() {
            let _ = self.screen.process_next().await;
        }
    }

    /// Waits for the next queued completion and applies it
    async fn settle(&mut self) {
        let _ = self.screen.process_next().await;
    }

    /// Runs a full search whose provider answers with `reply`
    async fn search_with(&mut self, query: &str, reply: Reply) {
        self.provider.answer(query, reply);
        self.search(query).await;
        self.settle().await;
    }

    fn drain(&mut self) -> Vec<UiEffect> {
        let mut effects = Vec::new();
        while let Ok(effect) = self.effects.try_recv() {
            effects.push(effect);
        }
        effects
    }

    fn notices(&mut self) -> Vec<Notice> {
        self.drain()
            .into_iter()
            .filter_map(|effect| match effect {
                UiEffect::Notice(notice) => Some(notice),
                _ => None,
            })
            .collect()
    }
}

fn movies(titles: &[(u64, &str)]) -> Vec<Movie> {
    titles.iter().map(|(id, title)| Movie::new(*id, *title)).collect()
}

#[tokio::test]
async fn test_empty_queries_are_rejected_locally() {
    for query in ["", "   ", "\t\n "] {
        let mut harness = Harness::new(true);
        harness.search(query).await;

        assert_eq!(harness.notices(), vec![Notice::EmptyQuery]);
        assert_eq!(harness.provider.calls(), 0);
    }
}

#[tokio::test]
async fn test_offline_rejects_any_query() {
    for query in ["alien", "  heat  ", ""] {
        let mut harness = Harness::new(false);
        harness.search(query).await;

        let expected = if query.trim().is_empty() {
            Notice::EmptyQuery
        } else {
            Notice::NoConnection
        };
        assert_eq!(harness.notices(), vec![expected]);
        assert_eq!(harness.provider.calls(), 0);
    }
}

#[tokio::test]
async fn test_successful_search_replaces_results_wholesale() {
    let mut harness = Harness::new(true);
    harness
        .search_with("alien", Ok(movies(&[(348, "Alien"), (679, "Aliens"), (8077, "Alien 3")])))
        .await;
    assert_eq!(harness.screen.adapter().item_count(), 3);
    harness.drain();

    let expected = movies(&[(949, "Heat"), (8195, "Ronin")]);
    harness.search_with("heist", Ok(expected.clone())).await;

    assert_eq!(harness.screen.results(), expected);
    assert_eq!(harness.screen.adapter().item_count(), 2);

    match harness.drain().as_slice() {
        [UiEffect::Render(rows)] => {
            let titles: Vec<_> = rows.iter().map(|row| row.title.as_str()).collect();
            assert_eq!(titles, vec!["Heat", "Ronin"]);
        }
        other => panic!("expected a single render, got {:?}", other),
    }
}

#[tokio::test]
async fn test_empty_result_keeps_previous_results() {
    let mut harness = Harness::new(true);
    let previous = movies(&[(78, "Blade Runner")]);
    harness.search_with("blade", Ok(previous.clone())).await;
    harness.drain();

    harness.search_with("zzzzqx", Ok(Vec::new())).await;

    assert_eq!(harness.notices(), vec![Notice::NoResults]);
    assert_eq!(harness.screen.results(), previous);
}

#[tokio::test]
async fn test_fetch_error_keeps_previous_results() {
    let mut harness = Harness::new(true);
    let previous = movies(&[(78, "Blade Runner")]);
    harness.search_with("blade", Ok(previous.clone())).await;
    harness.drain();

    harness.search_with("matrix", Err(AppError::Timeout)).await;

    let notices = harness.notices();
    assert_eq!(notices, vec![Notice::FetchError("timeout".to_string())]);
    assert_eq!(notices[0].to_string(), "Error fetching movies: timeout");
    assert_eq!(harness.screen.results(), previous);
}

#[tokio::test]
async fn test_tap_navigates_with_movie_at_position() {
    let mut harness = Harness::new(true);
    let found = movies(&[(348, "Alien"), (679, "Aliens"), (8077, "Alien 3")]);
    harness.search_with("alien", Ok(found.clone())).await;
    harness.drain();

    for (position, movie) in found.iter().enumerate() {
        let _ = harness.screen.handle_event(ScreenEvent::Tap(position));
        assert_eq!(
            harness.drain(),
            vec![UiEffect::Navigate(Destination::Details(movie.clone()))]
        );
    }

    let _ = harness.screen.handle_event(ScreenEvent::Tap(3));
    assert!(harness.drain().is_empty());
}

#[tokio::test]
async fn test_stale_completion_does_not_overwrite_newer_results() {
    let mut harness = Harness::new(true);
    let slow = harness.provider.script("slow");
    harness.provider.answer("fast", Ok(movies(&[(2, "Fast")])));

    harness.search("slow").await;
    harness.search("fast").await;
    harness.settle().await;
    assert_eq!(harness.screen.results(), movies(&[(2, "Fast")]));
    harness.drain();

    slow.send(Ok(movies(&[(1, "Slow")]))).unwrap();
    harness.settle().await;

    assert_eq!(harness.screen.results(), movies(&[(2, "Fast")]));
    assert!(harness.drain().is_empty());
    assert_eq!(harness.provider.calls(), 2);
}

#[tokio::test]
async fn test_run_loop_processes_handle_events_until_close() {
    let harness = Harness::new(true);
    harness
        .provider
        .answer("alien", Ok(movies(&[(348, "Alien")])));

    let Harness {
        screen,
        mut effects,
        ..
    } = harness;
    let handle = screen.handle();

    handle.search("alien").unwrap();
    handle.view_favorites().unwrap();

    let local = tokio::task::LocalSet::new();
    local
        .run_until(async move {
            let running = tokio::task::spawn_local(screen.run());

            let mut seen = Vec::new();
            while seen.len() < 2 {
                seen.push(effects.recv().await.unwrap());
            }
            handle.close().unwrap();
            running.await.unwrap();

            assert!(seen.contains(&UiEffect::Navigate(Destination::Favorites)));
            assert!(seen.iter().any(|effect| matches!(effect, UiEffect::Render(rows) if rows.len() == 1)));
        })
        .await;
}

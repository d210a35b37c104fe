use std::cell::RefCell;
use std::rc::Rc;

use tokio::sync::mpsc;

use crate::models::Movie;

use super::effects::{MovieRow, UiEffect};

/// Screen-owned result list, shared read-only with the adapter
///
/// `Rc` keeps it pinned to the screen's task.
pub type ResultSequence = Rc<RefCell<Vec<Movie>>>;

/// Binds a backing sequence to a list view
pub trait ListAdapter {
    type Row;

    fn item_count(&self) -> usize;

    /// Renders the item at `position`, `None` when out of range
    fn bind_row(&self, position: usize) -> Option<Self::Row>;

    /// Handles a tap on `position`; returns whether an item was selected
    fn on_row_tap(&self, position: usize) -> bool;
}

/// Binds every row of an adapter, in order
pub(crate) fn bind_all<A: ListAdapter + ?Sized>(adapter: &A) -> Vec<A::Row> {
    (0..adapter.item_count())
        .filter_map(|position| adapter.bind_row(position))
        .collect()
}

/// List adapter over the search results
pub struct MovieListAdapter {
    results: ResultSequence,
    on_select: Box<dyn Fn(&Movie)>,
    effects: mpsc::UnboundedSender<UiEffect>,
}

impl MovieListAdapter {
    pub fn new<F>(
        results: ResultSequence,
        effects: mpsc::UnboundedSender<UiEffect>,
        on_select: F,
    ) -> Self
    where
        F: Fn(&Movie) + 'static,
    {
        Self {
            results,
            on_select: Box::new(on_select),
            effects,
        }
    }

    /// Re-binds every row and publishes a full render
    pub fn notify_data_set_changed(&self) {
        let rows = bind_all(self);
        tracing::debug!(rows = rows.len(), "Re-rendering result list");
        let _ = self.effects.send(UiEffect::Render(rows));
    }
}

impl ListAdapter for MovieListAdapter {
    type Row = MovieRow;

    fn item_count(&self) -> usize {
        self.results.borrow().len()
    }

    fn bind_row(&self, position: usize) -> Option<MovieRow> {
        self.results
            .borrow()
            .get(position)
            .map(|movie| MovieRow::from((position, movie)))
    }

    fn on_row_tap(&self, position: usize) -> bool {
        // Release the borrow before the handler runs
        let selected = self.results.borrow().get(position).cloned();

        match selected {
            Some(movie) => {
                (self.on_select)(&movie);
                true
            }
            None => {
                tracing::debug!(position, "Ignoring tap outside the result list");
                false
            }
        }
    }
}

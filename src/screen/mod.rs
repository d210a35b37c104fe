//! The movie search screen: result list, adapter and the event loop that
//! owns them.

pub mod adapter;
pub mod effects;
pub mod request_id;
pub mod search_screen;

pub use adapter::{ListAdapter, MovieListAdapter, ResultSequence};
pub use effects::{Destination, MovieRow, Notice, UiEffect};
pub use request_id::RequestId;
pub use search_screen::{ScreenEvent, ScreenHandle, SearchScreen};

pub mod connectivity;
pub mod providers;
pub mod search_client;

pub use connectivity::{Connectivity, TcpProbe};
pub use providers::{MovieSearchProvider, TmdbProvider};
pub use search_client::{SearchClient, SearchOutcome};

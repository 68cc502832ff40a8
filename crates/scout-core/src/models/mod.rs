//! Domain models
//!
//! These are the shapes the orchestrator works with. Adapters translate their own
//! wire or storage representations into these types at the boundary.

mod media;
mod search;

pub use media::MediaItem;
pub use search::{SearchRequest, SearchResult, DEFAULT_SEARCH_LIMIT};

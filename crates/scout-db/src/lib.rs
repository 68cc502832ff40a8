//! Database repositories for the result store
//!
//! The store is append-only: search results are inserted once and read back by id.
//! Media items are kept as a single JSONB blob next to the scalar columns.

pub mod db;

pub use db::media_result::{decode_media, encode_media, MediaRecord, MediaResultRepository};
pub use db::{run_migrations, setup_pool, MIGRATOR};

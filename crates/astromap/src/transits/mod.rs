pub mod cache;
pub mod snapshot;

pub use cache::{global_engine, year_cache, TransitCache, TransitEngine, SNAPSHOT_HOUR_UTC};
pub use snapshot::{current_transits, TransitSnapshot};

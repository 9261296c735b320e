// Cache module for local filesystem caching.
// Stores search results and README documents with a fixed TTL.

pub mod paths;
pub mod store;

pub use paths::{DocumentKey, SearchKey};
pub use store::{Cache, CachedEntry, DEFAULT_TTL, now_millis, write_atomic};

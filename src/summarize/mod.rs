// Summarization module.
// Relay server that proxies the hosted model, and the client the explorer uses to reach it.

pub mod client;
pub mod relay;
pub mod types;

pub use client::{DEFAULT_RELAY_URL, Summarizer};
pub use relay::{DEFAULT_MODEL_URL, RelayState, build_cors_layer, create_router, serve};
pub use types::{DocumentKind, MAX_INPUT_CHARS, SUMMARY_FALLBACK, truncate_chars};

// repolens: explore GitHub repositories by language from the terminal.
// Library root shared by the TUI and the summarization relay binary.

pub mod app;
pub mod cache;
pub mod config;
pub mod error;
pub mod explorer;
pub mod favorites;
pub mod github;
pub mod logging;
pub mod state;
pub mod summarize;
pub mod ui;

pub use error::{AppError, Result};
pub use explorer::{Document, Explorer};
pub use favorites::{FavoriteRepo, FavoritesStore};

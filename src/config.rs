// Runtime configuration for the TUI and the summarization relay.
// Values come from command-line flags with environment variable fallbacks.

use std::path::PathBuf;

use clap::{Args, ValueEnum};

use crate::cache::paths;
use crate::error::{AppError, Result};
use crate::github::GITHUB_API_BASE;
use crate::summarize::{DEFAULT_MODEL_URL, DEFAULT_RELAY_URL};

/// Origins allowed to call the relay in production.
pub const PRODUCTION_ORIGINS: &[&str] = &["https://www.bienvenudev.tech"];

/// Origins allowed to call the relay during local development.
pub const DEVELOPMENT_ORIGINS: &[&str] = &[
    "http://127.0.0.1:5500",
    "http://127.0.0.1:5501",
    "http://localhost:5500",
    "http://localhost:5501",
];

/// Settings for the terminal UI.
#[derive(Debug, Clone, Args)]
pub struct TuiConfig {
    /// Base URL of the summarization relay
    #[arg(long, env = "REPOLENS_RELAY_URL", default_value = DEFAULT_RELAY_URL)]
    pub relay_url: String,

    /// Base URL of the GitHub REST API
    #[arg(long, env = "REPOLENS_GITHUB_API", default_value = GITHUB_API_BASE)]
    pub github_api: String,

    /// Optional GitHub token, raises the API rate limit
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Cache directory (default: platform cache dir)
    #[arg(long, env = "REPOLENS_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Data directory holding favorites (default: platform data dir)
    #[arg(long, env = "REPOLENS_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Bypass the local cache entirely
    #[arg(long)]
    pub no_cache: bool,

    /// Delete all cached entries before starting
    #[arg(long)]
    pub clear_cache: bool,
}

impl TuiConfig {
    /// Resolve the cache directory, falling back to the platform default.
    pub fn cache_dir(&self) -> Result<PathBuf> {
        self.cache_dir
            .clone()
            .or_else(paths::cache_dir)
            .ok_or_else(|| AppError::Config("could not determine a cache directory".to_string()))
    }

    /// Resolve the data directory, falling back to the platform default.
    pub fn data_dir(&self) -> Result<PathBuf> {
        self.data_dir
            .clone()
            .or_else(paths::data_dir)
            .ok_or_else(|| AppError::Config("could not determine a data directory".to_string()))
    }
}

/// Deployment mode of the relay; selects the default CORS allow-list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum RelayMode {
    Production,
    #[default]
    Development,
}

/// Settings for the summarization relay server.
#[derive(Debug, Clone, Args)]
pub struct RelayConfig {
    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 3001)]
    pub port: u16,

    /// Bearer token for the summarization API
    #[arg(long, env = "HUGGINGFACE_API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,

    /// Deployment mode
    #[arg(long, env = "RELAY_MODE", value_enum, default_value_t = RelayMode::Development)]
    pub mode: RelayMode,

    /// Summarization model endpoint
    #[arg(long, env = "HUGGINGFACE_MODEL_URL", default_value = DEFAULT_MODEL_URL)]
    pub model_url: String,

    /// Allowed CORS origins, replacing the mode's defaults
    #[arg(long = "cors-origin", env = "RELAY_CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Vec<String>,
}

impl RelayConfig {
    /// Origins the relay accepts browser requests from.
    pub fn allowed_origins(&self) -> Vec<String> {
        if !self.cors_origins.is_empty() {
            return self.cors_origins.clone();
        }
        let defaults = match self.mode {
            RelayMode::Production => PRODUCTION_ORIGINS,
            RelayMode::Development => DEVELOPMENT_ORIGINS,
        };
        defaults.iter().map(|origin| origin.to_string()).collect()
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            port: 3001,
            api_token: None,
            mode: RelayMode::default(),
            model_url: DEFAULT_MODEL_URL.to_string(),
            cors_origins: Vec::new(),
        }
    }
}

// Entry point for the repolens binary.
// Runs the terminal UI by default, or the summarization relay with `repolens relay`.

use clap::{Parser, Subcommand};

use repolens::app::App;
use repolens::cache::{Cache, paths};
use repolens::config::{RelayConfig, TuiConfig};
use repolens::github::GitHubClient;
use repolens::summarize::{self, Summarizer};
use repolens::{Explorer, FavoritesStore, Result, logging};

#[derive(Debug, Parser)]
#[command(name = "repolens", version, about, args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    tui: TuiConfig,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Browse repositories in the terminal (default)
    Tui(TuiConfig),
    /// Run the summarization relay server
    Relay(RelayConfig),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Relay(config)) => {
            logging::init_stdout()?;
            summarize::serve(config).await
        }
        Some(Command::Tui(config)) => run_tui(config).await,
        None => run_tui(cli.tui).await,
    }
}

async fn run_tui(config: TuiConfig) -> Result<()> {
    let cache_dir = config.cache_dir()?;
    let _guard = logging::init_file(&paths::log_dir(&cache_dir))?;

    let cache = Cache::new(&cache_dir);
    if config.clear_cache {
        cache.clear()?;
        tracing::info!(dir = %cache_dir.display(), "Cache cleared");
    }
    let cache = (!config.no_cache).then_some(cache);

    let github = GitHubClient::new(&config.github_api, config.github_token.as_deref())?;
    let explorer = Explorer::new(github, cache, Summarizer::new(&config.relay_url));
    let favorites = FavoritesStore::load(paths::favorites_path(&config.data_dir()?))?;
    tracing::info!(
        favorites = favorites.len(),
        relay = %config.relay_url,
        "Starting repolens"
    );

    let mut app = App::new(explorer, favorites);
    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal).await;
    ratatui::restore();

    result
}

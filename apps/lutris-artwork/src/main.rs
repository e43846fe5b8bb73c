//! lutris-artwork entry point.

mod config;

use anyhow::Context;
use artwork_sync::{SteamGridDbSource, SyncOrchestrator};
use tracing_subscriber::EnvFilter;

fn main() {
    // A missing `.env` is fine; the environment may already be set.
    let _ = dotenv::dotenv();

    // Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("LUTRIS_ARTWORK_LOG")
                .or_else(|_| EnvFilter::try_from_default_env())
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run() {
        tracing::error!("{e:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting lutris-artwork");

    let config = config::Config::load()?;
    if config.api_key.is_empty() {
        tracing::warn!(
            "{} is not set; SteamGridDB will reject lookups",
            config::API_KEY_ENV
        );
    }

    let db_path = config.paths.db_path();
    let slugs = lutris::read_game_slugs(&db_path)
        .with_context(|| format!("reading Lutris catalog {}", db_path.display()))?;

    let client = steamgriddb::Client::new(&config.api_key)?;
    let source = SteamGridDbSource::new(client);
    let orchestrator = SyncOrchestrator::new(&source, config.paths.clone());

    let rt = tokio::runtime::Runtime::new()?;
    let report = rt.block_on(orchestrator.run(&slugs));

    tracing::info!(
        games = report.catalog_size,
        pending = report.pending,
        downloaded = report.downloaded,
        already_present = report.already_present,
        skipped = report.skipped,
        failed = report.failed,
        "sync finished"
    );
    Ok(())
}

//! Sync error types.

/// Errors produced while syncing artwork for a game.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SteamGridDB error: {0}")]
    SteamGridDb(#[from] steamgriddb::Error),

    #[error("no SteamGridDB game found for {0:?}")]
    GameNotFound(String),

    #[error("no grids found for game {0}")]
    NoGrids(i32),

    #[error("no grid with width {0}")]
    NoMatchingGrid(i32),

    #[error("unsupported MIME type: {0:?}")]
    UnsupportedMime(String),

    #[error("source error: {0}")]
    Source(String),
}

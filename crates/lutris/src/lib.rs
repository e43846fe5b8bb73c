//! Lutris library access.
//!
//! Resolves the Lutris data directory, reads game slugs from the
//! `pga.db` catalog, and probes the cover/banner directories for
//! existing artwork.

pub mod catalog;
pub mod paths;
pub mod probe;

pub use catalog::{Catalog, read_game_slugs};
pub use paths::{AssetCategory, LutrisPaths};
pub use probe::{asset_missing, asset_path, existing_asset};

/// Errors from Lutris library access.
#[derive(Debug, thiserror::Error)]
pub enum LutrisError {
    #[error("home directory not found")]
    NoHomeDir,

    #[error("catalog error: {0}")]
    Database(#[from] rusqlite::Error),
}

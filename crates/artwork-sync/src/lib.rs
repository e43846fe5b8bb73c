//! Lutris artwork sync pipeline.
//!
//! Library crate with the business logic of the tool. The binary reads
//! the slugs and builds an `ArtworkSource`; everything after that lives
//! here.
//!
//! # Pipeline
//!
//! 1. **Filter**: keep slugs whose cover or banner is missing on disk
//! 2. **Lookup**: resolve the slug to a SteamGridDB game ID
//! 3. **Grids**: fetch static 600x900 and 920x430 candidates
//! 4. **Download**: pick the grid by exact width and write it into place

pub mod downloader;
pub mod error;
pub mod source;
pub mod sync;
pub mod types;

pub use downloader::{download_asset_if_needed, extension_for_mime, select_grid};
pub use error::SyncError;
pub use source::{ArtworkSource, SteamGridDbSource};
pub use sync::{SyncOrchestrator, filter_missing};
pub use types::{DownloadOutcome, SyncReport};

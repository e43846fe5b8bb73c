//! Shared types for the sync pipeline.

use std::path::PathBuf;

/// Result of a single download attempt that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// A new file was written.
    Downloaded { path: PathBuf, bytes: u64 },
    /// A `.jpg` or `.png` was already there; nothing was fetched.
    AlreadyPresent,
}

/// Counters collected over one sync run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Slugs read from the catalog.
    pub catalog_size: usize,
    /// Slugs with a missing cover or banner.
    pub pending: usize,
    /// Games skipped because the lookup or grid fetch failed.
    pub skipped: usize,
    pub downloaded: usize,
    pub already_present: usize,
    /// Individual downloads that failed.
    pub failed: usize,
}

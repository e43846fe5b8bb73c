//! Artwork presence checks.
//!
//! An asset counts as present when `<slug>.jpg` or `<slug>.png` exists
//! in its category directory.

use std::path::{Path, PathBuf};

/// File extensions accepted as existing artwork.
pub const ACCEPTED_EXTENSIONS: [&str; 2] = ["jpg", "png"];

/// Returns `<dir>/<slug>.<ext>`.
pub fn asset_path(dir: &Path, slug: &str, ext: &str) -> PathBuf {
    dir.join(format!("{slug}.{ext}"))
}

/// Returns the first existing artwork file for `slug`, if any.
pub fn existing_asset(dir: &Path, slug: &str) -> Option<PathBuf> {
    ACCEPTED_EXTENSIONS
        .iter()
        .map(|ext| asset_path(dir, slug, ext))
        .find(|p| p.exists())
}

/// Returns `true` if neither `<slug>.jpg` nor `<slug>.png` exists in `dir`.
pub fn asset_missing(dir: &Path, slug: &str) -> bool {
    existing_asset(dir, slug).is_none()
}

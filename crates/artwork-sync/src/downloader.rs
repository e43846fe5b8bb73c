//! Grid selection and download into the Lutris asset directories.
//!
//! Bytes land in a hidden `.part` file next to the destination and are
//! renamed into place only once the transfer finished, so an interrupted
//! download never looks like an existing asset.

use std::path::Path;

use lutris::{AssetCategory, asset_missing, asset_path};
use steamgriddb::ImageData;
use tracing::debug;

use crate::error::SyncError;
use crate::source::ArtworkSource;
use crate::types::DownloadOutcome;

/// Returns the first grid whose width equals `width` exactly.
pub fn select_grid(grids: &[ImageData], width: i32) -> Option<&ImageData> {
    grids.iter().find(|g| g.width == width)
}

/// Maps a declared MIME type to the file extension Lutris accepts.
pub fn extension_for_mime(mime: &str) -> Option<&'static str> {
    match mime {
        "image/jpeg" => Some("jpg"),
        "image/png" => Some("png"),
        _ => None,
    }
}

/// Downloads the `category` artwork for `slug` into `dir`, unless one exists.
pub async fn download_asset_if_needed(
    source: &dyn ArtworkSource,
    dir: &Path,
    slug: &str,
    category: AssetCategory,
    grids: &[ImageData],
) -> Result<DownloadOutcome, SyncError> {
    if !asset_missing(dir, slug) {
        return Ok(DownloadOutcome::AlreadyPresent);
    }

    let width = category.width();
    let grid = select_grid(grids, width).ok_or(SyncError::NoMatchingGrid(width))?;
    let ext = extension_for_mime(&grid.mime)
        .ok_or_else(|| SyncError::UnsupportedMime(grid.mime.clone()))?;

    tokio::fs::create_dir_all(dir).await?;

    // Dropping `tmp_path` on any early return removes the partial file.
    let (file, tmp_path) = tempfile::Builder::new()
        .prefix(&format!(".{slug}."))
        .suffix(".part")
        .tempfile_in(dir)?
        .into_parts();
    let mut file = tokio::fs::File::from_std(file);

    debug!(slug, %category, grid = grid.id, url = %grid.url, "downloading grid");
    let bytes = source.download(&grid.url, &mut file).await?;
    drop(file);

    let dest = asset_path(dir, slug, ext);
    tmp_path.persist(&dest).map_err(|e| e.error)?;

    Ok(DownloadOutcome::Downloaded { path: dest, bytes })
}

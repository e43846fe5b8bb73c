//! Sequential sync orchestrator.
//!
//! Walks the catalog slugs one at a time: lookup, grid fetch, then cover
//! and banner downloads. A failure only ends the current stage for the
//! current game; the run itself never fails.

use lutris::{AssetCategory, LutrisPaths, asset_missing};
use tracing::{debug, info};

use crate::downloader::download_asset_if_needed;
use crate::source::ArtworkSource;
use crate::types::{DownloadOutcome, SyncReport};

/// Returns the slugs whose cover or banner is missing, preserving order.
pub fn filter_missing(paths: &LutrisPaths, slugs: &[String]) -> Vec<String> {
    slugs
        .iter()
        .filter(|slug| {
            AssetCategory::all()
                .iter()
                .any(|&c| asset_missing(&paths.asset_dir(c), slug))
        })
        .cloned()
        .collect()
}

/// Drives the artwork sync for a Lutris library.
pub struct SyncOrchestrator<'a> {
    source: &'a dyn ArtworkSource,
    paths: LutrisPaths,
}

impl<'a> SyncOrchestrator<'a> {
    pub fn new(source: &'a dyn ArtworkSource, paths: LutrisPaths) -> Self {
        Self { source, paths }
    }

    /// Syncs artwork for every slug that is missing some.
    pub async fn run(&self, slugs: &[String]) -> SyncReport {
        let pending = filter_missing(&self.paths, slugs);
        let mut report = SyncReport {
            catalog_size: slugs.len(),
            pending: pending.len(),
            ..Default::default()
        };
        info!(
            games = slugs.len(),
            pending = pending.len(),
            "games with missing artwork"
        );

        for slug in &pending {
            self.sync_game(slug, &mut report).await;
        }

        report
    }

    async fn sync_game(&self, slug: &str, report: &mut SyncReport) {
        let game_id = match self.source.find_game_id(slug).await {
            Ok(id) => id,
            Err(e) => {
                debug!(slug, error = %e, "game lookup failed, skipping");
                report.skipped += 1;
                return;
            }
        };

        let grids = match self.source.fetch_grids(game_id).await {
            Ok(grids) => grids,
            Err(e) => {
                debug!(slug, game_id, error = %e, "grid fetch failed, skipping");
                report.skipped += 1;
                return;
            }
        };

        for &category in AssetCategory::all() {
            let dir = self.paths.asset_dir(category);
            match download_asset_if_needed(self.source, &dir, slug, category, &grids).await {
                Ok(DownloadOutcome::Downloaded { path, bytes }) => {
                    info!(slug, %category, path = %path.display(), bytes, "artwork downloaded");
                    report.downloaded += 1;
                }
                Ok(DownloadOutcome::AlreadyPresent) => {
                    report.already_present += 1;
                }
                Err(e) => {
                    debug!(slug, %category, error = %e, "artwork download failed");
                    report.failed += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn touch(dir: &Path, name: &str) {
        std::fs::create_dir_all(dir).unwrap();
        std::fs::write(dir.join(name), b"img").unwrap();
    }

    fn slugs(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn filter_keeps_games_missing_any_category() {
        let tmp = tempfile::tempdir().unwrap();
        let paths = LutrisPaths::with_base(tmp.path());
        let covers = paths.asset_dir(AssetCategory::Cover);
        let banners = paths.asset_dir(AssetCategory::Banner);

        // complete: both present; cover-only: banner missing; bare: nothing.
        touch(&covers, "complete.jpg");
        touch(&banners, "complete.png");
        touch(&covers, "cover-only.png");

        let pending = filter_missing(&paths, &slugs(&["complete", "cover-only", "bare"]));
        assert_eq!(pending, vec!["cover-only", "bare"]);
    }

    #[test]
    fn filter_without_asset_dirs_keeps_everything() {
        let tmp = tempfile::tempdir().unwrap();
        let paths = LutrisPaths::with_base(tmp.path());

        let pending = filter_missing(&paths, &slugs(&["a", "b"]));
        assert_eq!(pending, vec!["a", "b"]);
    }

    #[test]
    fn filter_empty_catalog() {
        let tmp = tempfile::tempdir().unwrap();
        let paths = LutrisPaths::with_base(tmp.path());
        assert!(filter_missing(&paths, &[]).is_empty());
    }
}

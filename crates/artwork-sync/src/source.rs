//! Remote artwork source trait and its SteamGridDB implementation.
//!
//! `ArtworkSource` is what the orchestrator talks to. Production code
//! uses [`SteamGridDbSource`]; tests plug in mocks.

use std::future::Future;
use std::pin::Pin;

use lutris::AssetCategory;
use steamgriddb::{Client, ImageData, ImageFilters};
use tokio::io::AsyncWrite;

use crate::error::SyncError;

/// Abstract remote artwork provider.
pub trait ArtworkSource: Send + Sync {
    /// Resolves a Lutris slug to a provider game ID.
    fn find_game_id<'a>(
        &'a self,
        slug: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<i32, SyncError>> + Send + 'a>>;

    /// Returns candidate grids for a game. Never returns an empty list.
    fn fetch_grids(
        &self,
        game_id: i32,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<ImageData>, SyncError>> + Send + '_>>;

    /// Streams the image at `url` into `out`, returning the byte count.
    fn download<'a>(
        &'a self,
        url: &'a str,
        out: &'a mut (dyn AsyncWrite + Unpin + Send),
    ) -> Pin<Box<dyn Future<Output = Result<u64, SyncError>> + Send + 'a>>;
}

/// `ArtworkSource` backed by the SteamGridDB API.
pub struct SteamGridDbSource {
    client: Client,
    filters: ImageFilters,
}

impl SteamGridDbSource {
    /// Wraps a client; grids are limited to static cover and banner sizes.
    pub fn new(client: Client) -> Self {
        let filters = ImageFilters::static_with_dimensions(
            AssetCategory::all().iter().map(|c| c.dimension()),
        );
        Self { client, filters }
    }
}

impl ArtworkSource for SteamGridDbSource {
    fn find_game_id<'a>(
        &'a self,
        slug: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<i32, SyncError>> + Send + 'a>> {
        Box::pin(async move {
            let results = self.client.search(slug).await?;
            // First hit wins; autocomplete is already ranked.
            results
                .first()
                .map(|r| r.id)
                .ok_or_else(|| SyncError::GameNotFound(slug.to_string()))
        })
    }

    fn fetch_grids(
        &self,
        game_id: i32,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<ImageData>, SyncError>> + Send + '_>> {
        Box::pin(async move {
            let grids = self.client.get_grids(game_id, Some(&self.filters)).await?;
            if grids.is_empty() {
                return Err(SyncError::NoGrids(game_id));
            }
            Ok(grids)
        })
    }

    fn download<'a>(
        &'a self,
        url: &'a str,
        out: &'a mut (dyn AsyncWrite + Unpin + Send),
    ) -> Pin<Box<dyn Future<Output = Result<u64, SyncError>> + Send + 'a>> {
        Box::pin(async move {
            let bytes = self.client.download_to(url, out).await?;
            Ok::<_, SyncError>(bytes)
        })
    }
}

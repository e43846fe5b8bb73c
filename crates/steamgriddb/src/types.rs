//! API response types for SteamGridDB.

use serde::{Deserialize, Serialize};

/// A game search result from the SteamGridDB API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub verified: bool,
}

/// Image metadata from the SteamGridDB API.
///
/// Only `url`, `mime` and `width` drive selection; the rest is carried
/// along for logging.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageData {
    #[serde(default)]
    pub id: i32,
    #[serde(default)]
    pub score: i32,
    #[serde(default)]
    pub style: String,
    #[serde(default)]
    pub width: i32,
    #[serde(default)]
    pub height: i32,
    #[serde(default)]
    pub mime: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub thumb: String,
}

/// Server-side filters for grid queries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageFilters {
    /// Accepted `WIDTHxHEIGHT` strings, e.g. `"600x900"`.
    pub dimensions: Vec<String>,
    /// Excludes animated grids (`types=static`).
    pub static_only: bool,
}

impl ImageFilters {
    /// Static images restricted to the given dimension strings.
    pub fn static_with_dimensions<I, S>(dimensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            dimensions: dimensions.into_iter().map(Into::into).collect(),
            static_only: true,
        }
    }
}

/// API response wrapper (internal).
#[derive(Debug, Deserialize)]
pub(crate) struct ApiResponse<T> {
    #[serde(default)]
    pub data: T,
}

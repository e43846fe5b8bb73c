//! SteamGridDB API client for game lookup and grid download.
//!
//! Provides an async client for the [SteamGridDB](https://www.steamgriddb.com)
//! API v2. Only the search and grid endpoints are wrapped.

pub mod client;
pub mod types;

pub use client::{Client, Error};
pub use types::{ImageData, ImageFilters, SearchResult};

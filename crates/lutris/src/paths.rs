use std::fmt;
use std::path::{Path, PathBuf};

use crate::LutrisError;

/// Category of Lutris artwork.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetCategory {
    /// 600x900 vertical cover.
    Cover,
    /// 920x430 horizontal banner.
    Banner,
}

impl AssetCategory {
    /// Returns all artwork categories, in download order.
    pub fn all() -> &'static [AssetCategory] {
        &[AssetCategory::Cover, AssetCategory::Banner]
    }

    /// Expected pixel width of a matching grid.
    pub fn width(&self) -> i32 {
        match self {
            AssetCategory::Cover => 600,
            AssetCategory::Banner => 920,
        }
    }

    /// SteamGridDB dimension filter string.
    pub fn dimension(&self) -> &'static str {
        match self {
            AssetCategory::Cover => "600x900",
            AssetCategory::Banner => "920x430",
        }
    }

    /// Directory name under the Lutris data directory.
    fn dir_name(&self) -> &'static str {
        match self {
            AssetCategory::Cover => "coverart",
            AssetCategory::Banner => "banners",
        }
    }
}

impl fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetCategory::Cover => write!(f, "cover"),
            AssetCategory::Banner => write!(f, "banner"),
        }
    }
}

/// Provides access to Lutris data paths.
#[derive(Debug, Clone)]
pub struct LutrisPaths {
    base_dir: PathBuf,
}

impl LutrisPaths {
    /// Uses `~/.local/share/lutris`.
    pub fn from_home() -> Result<Self, LutrisError> {
        Self::under_home(home_dir())
    }

    /// Uses `<home>/.local/share/lutris`.
    pub fn under_home(home: Option<PathBuf>) -> Result<Self, LutrisError> {
        let home = home.ok_or(LutrisError::NoHomeDir)?;
        Ok(Self::with_base(
            home.join(".local").join("share").join("lutris"),
        ))
    }

    /// Creates a new `LutrisPaths` instance with a custom base directory.
    pub fn with_base(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Path to the `pga.db` catalog.
    pub fn db_path(&self) -> PathBuf {
        self.base_dir.join("pga.db")
    }

    /// Directory holding artwork of the given category.
    pub fn asset_dir(&self, category: AssetCategory) -> PathBuf {
        self.base_dir.join(category.dir_name())
    }
}

/// Returns the user's home directory from `$HOME`.
pub fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
}

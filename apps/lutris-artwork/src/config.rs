//! Runtime configuration.
//!
//! The API key comes from `SGDB_API_KEY` (a `.env` file is loaded before
//! this runs). An optional TOML file may provide a fallback key and a
//! custom Lutris data directory:
//! - `$XDG_CONFIG_HOME/lutris-artwork/config.toml`
//! - `~/.config/lutris-artwork/config.toml`

use std::path::{Path, PathBuf};

use anyhow::Context;
use lutris::LutrisPaths;
use serde::Deserialize;

/// Environment variable holding the SteamGridDB API key.
pub const API_KEY_ENV: &str = "SGDB_API_KEY";

/// Contents of the optional config file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    api_key: Option<String>,

    /// Lutris data directory (`~` is expanded).
    #[serde(default)]
    lutris_dir: Option<String>,
}

/// Resolved configuration.
pub struct Config {
    /// SteamGridDB API key, empty if none was configured.
    pub api_key: String,
    pub paths: LutrisPaths,
}

impl Config {
    /// Loads the config file (if any) and applies environment overrides.
    pub fn load() -> anyhow::Result<Self> {
        let home = lutris::paths::home_dir();
        let xdg = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from);

        let file = match config_path(xdg, home.as_deref()) {
            Some(path) if path.exists() => read_file_config(&path)?,
            _ => FileConfig::default(),
        };

        Self::resolve(file, std::env::var(API_KEY_ENV).ok(), home.as_deref())
    }

    fn resolve(
        file: FileConfig,
        env_key: Option<String>,
        home: Option<&Path>,
    ) -> anyhow::Result<Self> {
        let mut api_key = env_key
            .filter(|k| !k.is_empty())
            .or(file.api_key)
            .unwrap_or_default();
        if !is_valid_api_key(&api_key) {
            tracing::warn!("ignoring API key with non-printable or non-ASCII characters");
            api_key.clear();
        }

        let paths = match file.lutris_dir {
            Some(dir) => LutrisPaths::with_base(expand_home(&dir, home)?),
            None => LutrisPaths::under_home(home.map(Path::to_path_buf))?,
        };

        Ok(Self { api_key, paths })
    }
}

/// A key must fit in an `Authorization` header as-is.
fn is_valid_api_key(key: &str) -> bool {
    key.bytes().all(|b| b.is_ascii_graphic())
}

fn read_file_config(path: &Path) -> anyhow::Result<FileConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let config = toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))?;
    tracing::debug!(path = %path.display(), "config file loaded");
    Ok(config)
}

/// Returns the config file location, preferring `$XDG_CONFIG_HOME`.
fn config_path(xdg_config_home: Option<PathBuf>, home: Option<&Path>) -> Option<PathBuf> {
    xdg_config_home
        .filter(|p| p.is_absolute())
        .or_else(|| home.map(|h| h.join(".config")))
        .map(|base| base.join("lutris-artwork").join("config.toml"))
}

/// Expands a leading `~` to the user's home directory.
fn expand_home(path: &str, home: Option<&Path>) -> anyhow::Result<PathBuf> {
    let rest = match path.strip_prefix("~") {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest.trim_start_matches('/'),
        _ => return Ok(PathBuf::from(path)),
    };
    let home = home.context("cannot expand `~`: home directory not found")?;
    Ok(if rest.is_empty() {
        home.to_path_buf()
    } else {
        home.join(rest)
    })
}

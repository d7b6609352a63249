//! Server configuration from environment variables.
//!
//! Load configuration using `Config::from_env()` after calling `dotenvy::dotenv()`.

use std::path::PathBuf;

/// Default directory holding the public assets (models, videos, images).
pub const DEFAULT_ASSETS_DIR: &str = "public";

/// Default `max-age` for static assets, in seconds.
pub const DEFAULT_ASSET_CACHE_SECS: u64 = 3600;

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Directory served as static assets
    /// Example: /srv/landing/public
    pub assets_dir: PathBuf,

    /// `Cache-Control: max-age` applied to static assets
    pub asset_cache_secs: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Call `dotenvy::dotenv()` before this to load from `.env` file.
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var("LANDING_ASSETS_DIR").ok(),
            std::env::var("LANDING_ASSET_CACHE_SECS").ok(),
        )
    }

    /// Build from raw values; unset or unparsable values fall back to defaults.
    pub fn from_vars(assets_dir: Option<String>, asset_cache_secs: Option<String>) -> Self {
        Self {
            assets_dir: assets_dir
                .filter(|dir| !dir.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ASSETS_DIR)),
            asset_cache_secs: asset_cache_secs
                .and_then(|secs| secs.trim().parse().ok())
                .unwrap_or(DEFAULT_ASSET_CACHE_SECS),
        }
    }

    /// Value for the `Cache-Control` header on static assets
    pub fn cache_control(&self) -> String {
        format!("public, max-age={}", self.asset_cache_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_vars(None, None)
    }
}

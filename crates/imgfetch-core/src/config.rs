use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::safety::DEFAULT_MAX_IMAGE_BYTES;
use crate::transport::DEFAULT_TIMEOUT_SECS;

/// Default collection directory, relative to the working directory.
pub const DEFAULT_DOWNLOAD_DIR: &str = "Fetched_Images";

/// Global configuration loaded from `~/.config/imgfetch/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageFetchConfig {
    /// Directory images are saved into (created if absent).
    #[serde(default = "default_download_dir")]
    pub download_dir: PathBuf,
    /// Reject responses whose declared `Content-Length` exceeds this many bytes.
    #[serde(default = "default_max_image_bytes")]
    pub max_image_bytes: u64,
    /// Total time bound for one GET, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// URLs fetched at once. 1 = sequential.
    #[serde(default = "default_workers")]
    pub workers: usize,
}

fn default_download_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DOWNLOAD_DIR)
}

fn default_max_image_bytes() -> u64 {
    DEFAULT_MAX_IMAGE_BYTES
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_workers() -> usize {
    1
}

impl Default for ImageFetchConfig {
    fn default() -> Self {
        Self {
            download_dir: default_download_dir(),
            max_image_bytes: default_max_image_bytes(),
            request_timeout_secs: default_request_timeout_secs(),
            workers: default_workers(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("imgfetch")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ImageFetchConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = ImageFetchConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml).with_context(|| format!("write {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    let cfg: ImageFetchConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::dispatcher::DEFAULT_WORKERS;
use crate::http::HttpOptions;

/// Global configuration loaded from `~/.config/grabber/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrabberConfig {
    /// Concurrent download workers when `--workers` is not given.
    #[serde(default = "default_workers")]
    pub workers: usize,
    /// Where `--debug` writes the fetched page body.
    #[serde(default = "default_debug_html_path")]
    pub debug_html_path: PathBuf,
    /// Maximum redirect hops per request.
    #[serde(default = "default_max_redirections")]
    pub max_redirections: u32,
    /// Optional connect timeout in seconds (None = libcurl default).
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
}

fn default_workers() -> usize {
    DEFAULT_WORKERS
}

fn default_debug_html_path() -> PathBuf {
    PathBuf::from("debug.html")
}

fn default_max_redirections() -> u32 {
    HttpOptions::default().max_redirections
}

impl Default for GrabberConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            debug_html_path: default_debug_html_path(),
            max_redirections: default_max_redirections(),
            connect_timeout_secs: None,
        }
    }
}

impl GrabberConfig {
    /// Transport settings derived from this config.
    pub fn http_options(&self) -> HttpOptions {
        HttpOptions {
            max_redirections: self.max_redirections,
            connect_timeout: self.connect_timeout_secs.map(Duration::from_secs),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("grabber")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<GrabberConfig> {
    load_or_init_at(&config_path()?)
}

/// Like [`load_or_init`] but with an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<GrabberConfig> {
    if !path.exists() {
        let default_cfg = GrabberConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml).with_context(|| format!("write {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: GrabberConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}

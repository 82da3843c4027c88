//! Application configuration types.

use crate::sources::SourceSpec;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default sitemap output path.
pub const DEFAULT_OUTPUT_PATH: &str = "sitemap.xml";

/// Sitemap output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Where `export` and `watch` write the sitemap.
    #[serde(default = "default_output_path")]
    pub path: PathBuf,

    /// Gzip the output regardless of extension (default: false;
    /// a `.gz` extension also enables compression).
    #[serde(default)]
    pub gzip: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            gzip: false,
        }
    }
}

fn default_output_path() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_PATH)
}

/// File-watch settings for the hot-reload mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Debounce window for coalescing rapid file changes, in
    /// milliseconds (default: 500).
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

fn default_debounce_ms() -> u64 {
    500
}

/// Top-level application configuration.
///
/// Assembled by the loader from embedded defaults, the user tier, the
/// project tier, and environment overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,

    /// Watch settings.
    #[serde(default)]
    pub watch: WatchConfig,

    /// Declared configuration sources, in aggregation order.
    #[serde(default)]
    pub sources: Vec<SourceSpec>,
}

impl Config {
    /// Create the output file's parent directory if needed.
    pub fn ensure_output_dir(&self) -> std::io::Result<()> {
        if let Some(parent) = self.output.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

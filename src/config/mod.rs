//! Tiered application configuration.
//!
//! Consolidates configuration from three tiers with field-by-field
//! YAML merging:
//! 1. **Defaults** - embedded in the binary
//! 2. **Project** - `./sitemap.yaml`
//! 3. **User** - `~/.sitemap/config.yaml`
//!
//! Objects merge field-by-field; arrays (notably `sources:`) are
//! replaced entirely by the highest tier that declares them.
//!
//! ## Environment variables
//! - `SITEMAP_CONFIG_PATH` - explicit config file (bypasses merging)
//! - `SITEMAP_USER_DIR` - user config dir (default: `~/.sitemap`)
//! - `SITEMAP_OUTPUT_PATH` - sitemap output path

mod loader;
mod merge;
mod types;

pub use loader::{ConfigLoader, ConfigPaths, ConfigTier};
pub use merge::{deep_merge, deep_merge_all};
pub use types::{Config, DEFAULT_OUTPUT_PATH, OutputConfig, WatchConfig};

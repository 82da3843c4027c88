//! Configuration loader with tier-based merging.
//!
//! Loads the application config from up to three tiers and merges them
//! field-by-field, lowest priority first:
//! 1. Embedded defaults
//! 2. Project config (`./sitemap.yaml`)
//! 3. User config (`~/.sitemap/config.yaml`)
//!
//! `SITEMAP_CONFIG_PATH` selects an explicit file that bypasses tier
//! merging entirely; `SITEMAP_USER_DIR` relocates the user tier.

use super::merge::deep_merge_all;
use super::types::Config;
use anyhow::{Context, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Configuration tier priority (lowest to highest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConfigTier {
    /// Embedded defaults (lowest priority)
    Defaults = 0,
    /// Project-level config (`./sitemap.yaml`)
    Project = 1,
    /// User-level config (`~/.sitemap/config.yaml`, highest priority)
    User = 2,
}

impl std::fmt::Display for ConfigTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigTier::Defaults => write!(f, "defaults"),
            ConfigTier::Project => write!(f, "project"),
            ConfigTier::User => write!(f, "user"),
        }
    }
}

/// File locations for each configuration tier.
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    /// Project-level config file.
    pub project_file: Option<PathBuf>,
    /// User-level config file.
    pub user_file: Option<PathBuf>,
}

impl Default for ConfigPaths {
    fn default() -> Self {
        Self::discover()
    }
}

impl ConfigPaths {
    /// Discover configuration paths from environment and defaults.
    pub fn discover() -> Self {
        // User file: $SITEMAP_USER_DIR/config.yaml or ~/.sitemap/config.yaml
        let user_file = std::env::var("SITEMAP_USER_DIR")
            .ok()
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|h| h.join(".sitemap")))
            .map(|dir| dir.join("config.yaml"));

        // Project file: ./sitemap.yaml
        let project_file = Some(PathBuf::from("sitemap.yaml"));

        Self {
            project_file,
            user_file,
        }
    }

    /// Create paths with explicit files (used by tests and embedders).
    pub fn with_files(project_file: Option<PathBuf>, user_file: Option<PathBuf>) -> Self {
        Self {
            project_file,
            user_file,
        }
    }
}

/// Loader that performs tier-based merging and remembers where the
/// effective source list came from.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Tier file locations.
    pub paths: ConfigPaths,
    /// Merged configuration.
    config: Config,
    /// File whose `sources` list won the merge, if any.
    sources_origin: Option<PathBuf>,
}

impl ConfigLoader {
    /// Load configuration from all tiers with proper merging.
    pub fn load() -> Result<Self> {
        Self::load_with_paths(ConfigPaths::discover())
    }

    /// Load configuration with explicit tier paths.
    pub fn load_with_paths(paths: ConfigPaths) -> Result<Self> {
        // Explicit config path bypasses tier merging entirely.
        if let Ok(explicit) = std::env::var("SITEMAP_CONFIG_PATH") {
            let path = PathBuf::from(&explicit);
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config file {}", path.display()))?;
            let config: Config = serde_yaml::from_str(&content)
                .with_context(|| format!("failed to parse config file {}", path.display()))?;
            let sources_origin = (!config.sources.is_empty()).then(|| path.clone());
            return Ok(Self {
                paths,
                config,
                sources_origin,
            });
        }

        // Collect tier values, lowest priority first.
        let mut tiers: Vec<(Value, Option<PathBuf>)> = Vec::new();

        // Tier 1: embedded defaults
        if let Ok(defaults) = serde_json::to_value(Config::default()) {
            tiers.push((defaults, None));
        }

        // Tier 2: project config
        if let Some(value) = Self::read_tier(paths.project_file.as_deref(), ConfigTier::Project) {
            let path = paths.project_file.clone();
            tiers.push((value, path));
        }

        // Tier 3: user config
        if let Some(value) = Self::read_tier(paths.user_file.as_deref(), ConfigTier::User) {
            let path = paths.user_file.clone();
            tiers.push((value, path));
        }

        // Array-replace merge semantics mean the sources list comes
        // wholly from the highest tier that declares it; that tier's
        // directory anchors relative fragment paths.
        let sources_origin = tiers
            .iter()
            .rev()
            .find(|(value, _)| {
                value
                    .get("sources")
                    .is_some_and(|s| s.as_array().is_some_and(|a| !a.is_empty()))
            })
            .and_then(|(_, path)| path.clone());

        let merged = deep_merge_all(tiers.into_iter().map(|(value, _)| value));
        let mut config: Config =
            serde_json::from_value(merged).context("invalid merged configuration")?;

        Self::apply_env_overrides(&mut config);

        Ok(Self {
            paths,
            config,
            sources_origin,
        })
    }

    /// Read and parse one tier file, warning (not failing) when the
    /// file exists but cannot be used.
    fn read_tier(path: Option<&Path>, tier: ConfigTier) -> Option<Value> {
        let path = path?;
        if !path.exists() {
            return None;
        }
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Skipping unreadable {} config {}: {}", tier, path.display(), e);
                return None;
            }
        };
        match serde_yaml::from_str::<Value>(&content) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Skipping invalid {} config {}: {}", tier, path.display(), e);
                None
            }
        }
    }

    /// Apply environment variable overrides to the merged config.
    fn apply_env_overrides(config: &mut Config) {
        if let Ok(output_path) = std::env::var("SITEMAP_OUTPUT_PATH") {
            config.output.path = PathBuf::from(output_path);
        }
    }

    /// Get the merged configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get mutable access to the configuration (CLI overrides).
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// Consume the loader and return the configuration.
    pub fn into_config(self) -> Config {
        self.config
    }

    /// File whose `sources` list is in effect, if any tier declared one.
    pub fn sources_origin(&self) -> Option<&Path> {
        self.sources_origin.as_deref()
    }

    /// Directory against which relative fragment paths resolve.
    pub fn base_dir(&self) -> PathBuf {
        self.sources_origin
            .as_deref()
            .and_then(Path::parent)
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

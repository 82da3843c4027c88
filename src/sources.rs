//! Declarative source registration.
//!
//! The application config declares an ordered `sources:` list; this
//! module turns those declarations into the provider collection the
//! aggregator is constructed with. Declaration order is aggregation
//! order.

use crate::providers::{EnvProvider, FileProvider, StaticProvider, UrlConfigProvider};
use crate::types::{CustomUrl, ExcludedUrl};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One declared configuration source.
///
/// ```yaml
/// sources:
///   - type: file
///     path: urls/storefront.yaml
///   - type: env
///     prefix: SITEMAP
///   - type: static
///     custom_urls:
///       - loc: https://shop.example.com/imprint
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SourceSpec {
    /// Fragment file (YAML or JSON), re-read on every aggregation.
    File {
        /// Path to the fragment; relative paths resolve against the
        /// config file's directory.
        path: PathBuf,
    },
    /// Environment variables under a prefix.
    Env {
        /// Variable prefix (default: `SITEMAP`).
        #[serde(default = "default_env_prefix")]
        prefix: String,
    },
    /// Inline fragment embedded in the config file.
    Static {
        #[serde(default)]
        excluded_urls: Vec<ExcludedUrl>,
        #[serde(default)]
        custom_urls: Vec<CustomUrl>,
    },
}

fn default_env_prefix() -> String {
    crate::providers::DEFAULT_ENV_PREFIX.to_string()
}

impl SourceSpec {
    /// Build the provider for this declaration.
    ///
    /// `base_dir` anchors relative file paths (typically the directory
    /// of the config file the declaration came from).
    pub fn build(&self, base_dir: &Path) -> Box<dyn UrlConfigProvider> {
        match self {
            SourceSpec::File { path } => {
                let resolved = if path.is_absolute() {
                    path.clone()
                } else {
                    base_dir.join(path)
                };
                Box::new(FileProvider::new(resolved))
            }
            SourceSpec::Env { prefix } => Box::new(EnvProvider::with_prefix(prefix.clone())),
            SourceSpec::Static {
                excluded_urls,
                custom_urls,
            } => {
                let mut provider = StaticProvider::empty("static");
                for entry in excluded_urls {
                    provider = provider.with_excluded(entry.clone());
                }
                for entry in custom_urls {
                    provider = provider.with_custom(entry.clone());
                }
                Box::new(provider)
            }
        }
    }

    /// The fragment file this source reads, if it is file-backed.
    pub fn file_path(&self, base_dir: &Path) -> Option<PathBuf> {
        match self {
            SourceSpec::File { path } if path.is_absolute() => Some(path.clone()),
            SourceSpec::File { path } => Some(base_dir.join(path)),
            _ => None,
        }
    }
}

/// Build providers for the declared sources, in declaration order.
pub fn build_providers(specs: &[SourceSpec], base_dir: &Path) -> Vec<Box<dyn UrlConfigProvider>> {
    specs.iter().map(|spec| spec.build(base_dir)).collect()
}

//! Environment-variable provider.
//!
//! Reads `{PREFIX}_EXCLUDED_URLS` and `{PREFIX}_CUSTOM_URLS`, each a
//! newline- or comma-separated list. Entries carry default presentation
//! fields since environment variables cannot express them.

use super::UrlConfigProvider;
use crate::error::ConfigResult;
use crate::types::{CustomUrl, ExcludedUrl, UrlConfig};

/// Default variable prefix.
pub const DEFAULT_ENV_PREFIX: &str = "SITEMAP";

/// Provider reading URL lists from the process environment.
#[derive(Debug, Clone)]
pub struct EnvProvider {
    prefix: String,
    name: String,
}

impl EnvProvider {
    /// Create a provider with the default `SITEMAP_` prefix.
    pub fn new() -> Self {
        Self::with_prefix(DEFAULT_ENV_PREFIX)
    }

    /// Create a provider scoped to a custom prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let name = format!("env:{}", prefix);
        Self { prefix, name }
    }

    fn entries(&self, suffix: &str) -> Vec<String> {
        let var = format!("{}_{}", self.prefix, suffix);
        let Ok(value) = std::env::var(&var) else {
            return Vec::new();
        };
        value
            .split(['\n', ','])
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

impl Default for EnvProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl UrlConfigProvider for EnvProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn url_config(&self) -> ConfigResult<UrlConfig> {
        let excluded_urls = self
            .entries("EXCLUDED_URLS")
            .into_iter()
            .map(ExcludedUrl::new)
            .collect();
        let custom_urls = self
            .entries("CUSTOM_URLS")
            .into_iter()
            .map(CustomUrl::new)
            .collect();
        Ok(UrlConfig {
            excluded_urls,
            custom_urls,
        })
    }
}

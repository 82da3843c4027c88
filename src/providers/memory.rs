//! In-memory provider for programmatic registration.

use super::UrlConfigProvider;
use crate::error::ConfigResult;
use crate::types::{CustomUrl, ExcludedUrl, UrlConfig};

/// Provider backed by a fixed in-memory fragment.
///
/// Useful for configuration assembled in code and as a test double.
#[derive(Debug, Clone)]
pub struct StaticProvider {
    name: String,
    config: UrlConfig,
}

impl StaticProvider {
    /// Create a provider returning the given fragment.
    pub fn new(name: impl Into<String>, config: UrlConfig) -> Self {
        Self {
            name: name.into(),
            config,
        }
    }

    /// Create an empty provider, then add entries with the builder methods.
    pub fn empty(name: impl Into<String>) -> Self {
        Self::new(name, UrlConfig::default())
    }

    /// Append an exclusion pattern.
    pub fn with_excluded(mut self, entry: ExcludedUrl) -> Self {
        self.config.excluded_urls.push(entry);
        self
    }

    /// Append a custom URL entry.
    pub fn with_custom(mut self, entry: CustomUrl) -> Self {
        self.config.custom_urls.push(entry);
        self
    }
}

impl UrlConfigProvider for StaticProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn url_config(&self) -> ConfigResult<UrlConfig> {
        Ok(self.config.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_provider_returns_fragment() {
        let provider = StaticProvider::empty("store")
            .with_excluded(ExcludedUrl::new("^/checkout/"))
            .with_custom(CustomUrl::new("https://shop.example.com/faq"));

        let config = provider.url_config().unwrap();
        assert_eq!(config.excluded_urls.len(), 1);
        assert_eq!(config.custom_urls[0].loc, "https://shop.example.com/faq");
        assert_eq!(provider.name(), "store");
    }
}

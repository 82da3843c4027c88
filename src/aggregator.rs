//! Ordered aggregation of provider fragments.
//!
//! The aggregator walks its providers in registration order, fetches
//! each fragment fresh, and concatenates the two lists. Nothing is
//! cached, deduplicated, or reordered; a provider error aborts the
//! whole call.

use crate::error::ConfigResult;
use crate::providers::UrlConfigProvider;
use crate::types::{UrlConfig, UrlKey, UrlList};

/// Aggregates sitemap URL configuration from an ordered provider set.
///
/// The provider collection is fixed at construction; to change sources,
/// build a new aggregator (the watch mode swaps whole instances).
pub struct ConfigAggregator {
    providers: Vec<Box<dyn UrlConfigProvider>>,
}

impl ConfigAggregator {
    /// Create an aggregator over providers in the given order.
    ///
    /// Providers are trusted to implement the fragment contract; no
    /// validation happens here.
    pub fn new(providers: Vec<Box<dyn UrlConfigProvider>>) -> Self {
        Self { providers }
    }

    /// Number of registered providers.
    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    /// Registered providers, in aggregation order.
    pub fn providers(&self) -> impl Iterator<Item = &dyn UrlConfigProvider> {
        self.providers.iter().map(Box::as_ref)
    }

    /// Fetch every provider fragment and concatenate both lists.
    ///
    /// Entries keep provider order and, within a provider, source
    /// order. Duplicates from different providers are preserved. The
    /// first provider error propagates unmodified and no partial
    /// result is observable.
    pub fn collect(&self) -> ConfigResult<UrlConfig> {
        let mut merged = UrlConfig::default();
        for provider in &self.providers {
            merged.extend(provider.url_config()?);
        }
        Ok(merged)
    }

    /// The merged list for `key`.
    ///
    /// With the closed [`UrlKey`] enum an invalid key cannot reach this
    /// method; the only failure mode is a provider error.
    pub fn get(&self, key: UrlKey) -> ConfigResult<UrlList> {
        Ok(self.collect()?.list(key))
    }

    /// The merged list for a string key - the external contract.
    ///
    /// Recognized keys are exactly [`crate::types::EXCLUDED_URLS_KEY`]
    /// and [`crate::types::CUSTOM_URLS_KEY`]; anything else fails with
    /// an invalid-key error carrying the offending value. The key is
    /// validated before any provider is invoked.
    pub fn get_by_key(&self, key: &str) -> ConfigResult<UrlList> {
        self.get(key.parse()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigError, ErrorCode};
    use crate::providers::StaticProvider;
    use crate::types::{CustomUrl, ExcludedUrl, CUSTOM_URLS_KEY, EXCLUDED_URLS_KEY};

    /// Provider that always fails, for fail-fast tests.
    struct BrokenProvider;

    impl UrlConfigProvider for BrokenProvider {
        fn name(&self) -> &str {
            "broken"
        }

        fn url_config(&self) -> ConfigResult<UrlConfig> {
            Err(ConfigError::provider("broken", "backing store offline"))
        }
    }

    fn excluded(patterns: &[&str]) -> StaticProvider {
        patterns.iter().fold(
            StaticProvider::empty("test"),
            |p, pat| p.with_excluded(ExcludedUrl::new(*pat)),
        )
    }

    #[test]
    fn test_concatenation_follows_provider_order() {
        let aggregator = ConfigAggregator::new(vec![
            Box::new(excluded(&["a", "b"])),
            Box::new(excluded(&["c"])),
        ]);
        let UrlList::Excluded(urls) = aggregator.get(UrlKey::ExcludedUrls).unwrap() else {
            panic!("wrong list variant");
        };
        let patterns: Vec<_> = urls.iter().map(|e| e.pattern.as_str()).collect();
        assert_eq!(patterns, ["a", "b", "c"]);

        // Reversed registration reverses the merge.
        let aggregator = ConfigAggregator::new(vec![
            Box::new(excluded(&["c"])),
            Box::new(excluded(&["a", "b"])),
        ]);
        let UrlList::Excluded(urls) = aggregator.get(UrlKey::ExcludedUrls).unwrap() else {
            panic!("wrong list variant");
        };
        let patterns: Vec<_> = urls.iter().map(|e| e.pattern.as_str()).collect();
        assert_eq!(patterns, ["c", "a", "b"]);
    }

    #[test]
    fn test_length_is_sum_of_contributions() {
        let aggregator = ConfigAggregator::new(vec![
            Box::new(
                StaticProvider::empty("a")
                    .with_custom(CustomUrl::new("https://x.example/1"))
                    .with_custom(CustomUrl::new("https://x.example/2")),
            ),
            Box::new(StaticProvider::empty("b")),
            Box::new(StaticProvider::empty("c").with_custom(CustomUrl::new("https://x.example/3"))),
        ]);
        assert_eq!(aggregator.get(UrlKey::CustomUrls).unwrap().len(), 3);
        assert_eq!(aggregator.get(UrlKey::ExcludedUrls).unwrap().len(), 0);
    }

    #[test]
    fn test_duplicates_preserved() {
        let entry = CustomUrl::new("https://x.example/landing");
        let aggregator = ConfigAggregator::new(vec![
            Box::new(StaticProvider::empty("a").with_custom(entry.clone())),
            Box::new(StaticProvider::empty("b").with_custom(entry.clone())),
        ]);
        let UrlList::Custom(urls) = aggregator.get(UrlKey::CustomUrls).unwrap() else {
            panic!("wrong list variant");
        };
        assert_eq!(urls, vec![entry.clone(), entry]);
    }

    #[test]
    fn test_empty_provider_list_yields_empty_lists() {
        let aggregator = ConfigAggregator::new(Vec::new());
        assert!(aggregator.get(UrlKey::ExcludedUrls).unwrap().is_empty());
        assert!(aggregator.get(UrlKey::CustomUrls).unwrap().is_empty());
        assert_eq!(aggregator.provider_count(), 0);
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let aggregator = ConfigAggregator::new(vec![
            Box::new(excluded(&["^/a/", "^/b/"])),
            Box::new(excluded(&["^/c/"])),
        ]);
        let first = aggregator.get(UrlKey::ExcludedUrls).unwrap();
        let second = aggregator.get(UrlKey::ExcludedUrls).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_provider_error_aborts_aggregation() {
        let aggregator = ConfigAggregator::new(vec![
            Box::new(excluded(&["a"])),
            Box::new(BrokenProvider),
            Box::new(excluded(&["b"])),
        ]);
        let err = aggregator.get(UrlKey::ExcludedUrls).unwrap_err();
        assert_eq!(err.code, ErrorCode::ProviderFailed);
        assert_eq!(err.field.as_deref(), Some("broken"));
    }

    #[test]
    fn test_string_contract_keys() {
        let aggregator = ConfigAggregator::new(vec![Box::new(excluded(&["a"]))]);
        assert_eq!(aggregator.get_by_key(EXCLUDED_URLS_KEY).unwrap().len(), 1);
        assert_eq!(aggregator.get_by_key(CUSTOM_URLS_KEY).unwrap().len(), 0);
    }

    #[test]
    fn test_invalid_string_key_errors_without_touching_providers() {
        // A broken provider proves validation happens first: the
        // invalid key must win over the provider failure.
        let aggregator = ConfigAggregator::new(vec![Box::new(BrokenProvider)]);
        let err = aggregator.get_by_key("filtered_urls").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidKey);
        assert_eq!(err.field.as_deref(), Some("filtered_urls"));
    }
}

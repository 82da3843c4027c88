//! Compiled exclusion rules.
//!
//! Exclusion patterns are regular expressions matched against candidate
//! URLs. Patterns stay opaque strings until export time; this module is
//! where they are compiled and applied.

use crate::error::{ConfigError, ConfigResult};
use crate::types::{CustomUrl, ExcludedUrl};
use regex_lite::Regex;

/// A set of exclusion patterns compiled for matching.
#[derive(Debug)]
pub struct ExclusionRules {
    rules: Vec<(ExcludedUrl, Regex)>,
}

impl ExclusionRules {
    /// Compile the given entries.
    ///
    /// Fails with an invalid-pattern error naming the first pattern
    /// that does not compile.
    pub fn compile(entries: &[ExcludedUrl]) -> ConfigResult<Self> {
        let mut rules = Vec::with_capacity(entries.len());
        for entry in entries {
            let regex = Regex::new(&entry.pattern)
                .map_err(|e| ConfigError::invalid_pattern(&entry.pattern, e))?;
            rules.push((entry.clone(), regex));
        }
        Ok(Self { rules })
    }

    /// Number of compiled rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when no rules are present.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// True when any rule matches the URL.
    pub fn is_excluded(&self, url: &str) -> bool {
        self.matching_rule(url).is_some()
    }

    /// The first rule matching the URL, if any.
    pub fn matching_rule(&self, url: &str) -> Option<&ExcludedUrl> {
        self.rules
            .iter()
            .find(|(_, regex)| regex.is_match(url))
            .map(|(entry, _)| entry)
    }

    /// Drop custom URLs matching any rule, preserving order.
    pub fn filter(&self, urls: Vec<CustomUrl>) -> Vec<CustomUrl> {
        urls.into_iter()
            .filter(|url| !self.is_excluded(&url.loc))
            .collect()
    }
}

//! Domain types for sitemap URL configuration.
//!
//! A provider contributes a [`UrlConfig`] fragment holding two ordered
//! lists: exclusion patterns and custom URL entries. The aggregator
//! concatenates fragments without inspecting entry contents.

use crate::error::{ConfigError, ConfigResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// String key for the merged exclusion-pattern list.
///
/// The exact value is part of the external contract (callers and
/// persisted configuration reference it) and must not be renamed.
pub const EXCLUDED_URLS_KEY: &str = "excluded_urls";

/// String key for the merged custom-URL list.
///
/// Same contract rules as [`EXCLUDED_URLS_KEY`].
pub const CUSTOM_URLS_KEY: &str = "custom_urls";

/// A URL exclusion entry.
///
/// `pattern` is matched against generated URLs (as a regular
/// expression, compiled by the exclusion module); the aggregator itself
/// treats it as opaque. `resource` optionally scopes the pattern to a
/// content type (e.g. "product", "category").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcludedUrl {
    /// Pattern matched against candidate URLs.
    pub pattern: String,
    /// Optional content-type scope for the pattern.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
}

impl ExcludedUrl {
    /// Create an unscoped exclusion pattern.
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            resource: None,
        }
    }
}

/// Update frequency hint for a sitemap entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeFrequency {
    Always,
    Hourly,
    Daily,
    #[default]
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFrequency {
    /// The sitemap-protocol token for this frequency.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeFrequency::Always => "always",
            ChangeFrequency::Hourly => "hourly",
            ChangeFrequency::Daily => "daily",
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
            ChangeFrequency::Yearly => "yearly",
            ChangeFrequency::Never => "never",
        }
    }
}

impl fmt::Display for ChangeFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A custom URL entry to be emitted into the sitemap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomUrl {
    /// Absolute URL of the page.
    pub loc: String,

    /// Last modification time, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_mod: Option<DateTime<Utc>>,

    /// Update frequency hint (default: weekly).
    #[serde(default)]
    pub change_freq: ChangeFrequency,

    /// Relative priority in 0.0..=1.0 (default: 0.5).
    #[serde(default = "default_priority")]
    pub priority: f32,
}

fn default_priority() -> f32 {
    0.5
}

impl CustomUrl {
    /// Create an entry with default presentation fields.
    pub fn new(loc: impl Into<String>) -> Self {
        Self {
            loc: loc.into(),
            last_mod: None,
            change_freq: ChangeFrequency::default(),
            priority: default_priority(),
        }
    }
}

/// The two-field configuration fragment a provider returns.
///
/// Both fields are required on deserialization: a source that omits one
/// violates the provider contract and is rejected up front rather than
/// silently treated as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UrlConfig {
    /// Exclusion patterns, in source order.
    pub excluded_urls: Vec<ExcludedUrl>,
    /// Custom URL entries, in source order.
    pub custom_urls: Vec<CustomUrl>,
}

impl UrlConfig {
    /// Append another fragment's entries, preserving order.
    pub fn extend(&mut self, other: UrlConfig) {
        self.excluded_urls.extend(other.excluded_urls);
        self.custom_urls.extend(other.custom_urls);
    }

    /// The list stored under `key`.
    pub fn list(&self, key: UrlKey) -> UrlList {
        match key {
            UrlKey::ExcludedUrls => UrlList::Excluded(self.excluded_urls.clone()),
            UrlKey::CustomUrls => UrlList::Custom(self.custom_urls.clone()),
        }
    }
}

/// Closed enumeration of the recognized configuration keys.
///
/// Using an enum makes an invalid key unrepresentable for in-process
/// callers; the string forms exist for the external contract and are
/// parsed through [`UrlKey::from_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrlKey {
    ExcludedUrls,
    CustomUrls,
}

impl UrlKey {
    /// The contract string for this key.
    pub fn as_str(&self) -> &'static str {
        match self {
            UrlKey::ExcludedUrls => EXCLUDED_URLS_KEY,
            UrlKey::CustomUrls => CUSTOM_URLS_KEY,
        }
    }
}

impl fmt::Display for UrlKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UrlKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> ConfigResult<Self> {
        match s {
            EXCLUDED_URLS_KEY => Ok(UrlKey::ExcludedUrls),
            CUSTOM_URLS_KEY => Ok(UrlKey::CustomUrls),
            other => Err(ConfigError::invalid_key(other)),
        }
    }
}

/// A merged list returned by the aggregator for one key.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum UrlList {
    Excluded(Vec<ExcludedUrl>),
    Custom(Vec<CustomUrl>),
}

impl UrlList {
    /// Which key this list belongs to.
    pub fn key(&self) -> UrlKey {
        match self {
            UrlList::Excluded(_) => UrlKey::ExcludedUrls,
            UrlList::Custom(_) => UrlKey::CustomUrls,
        }
    }

    /// Number of entries in the list.
    pub fn len(&self) -> usize {
        match self {
            UrlList::Excluded(urls) => urls.len(),
            UrlList::Custom(urls) => urls.len(),
        }
    }

    /// True when the list holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

//! Pluggable sources of sitemap URL configuration.
//!
//! Every source implements [`UrlConfigProvider`]; the aggregator holds
//! the providers as trait objects in registration order. Built-ins:
//! - [`StaticProvider`] - in-memory fragment
//! - [`FileProvider`] - YAML/JSON file, re-read on every call
//! - [`EnvProvider`] - environment variables under a prefix

mod env;
mod file;
mod memory;

pub use env::{DEFAULT_ENV_PREFIX, EnvProvider};
pub use file::FileProvider;
pub use memory::StaticProvider;

use crate::error::ConfigResult;
use crate::types::UrlConfig;

/// A source contributing one sitemap configuration fragment.
///
/// Implementations are trusted to return both lists; fetch errors
/// propagate to the aggregation caller unmodified (fail-fast). The
/// fetch must be read-only with respect to the aggregator, but may
/// return different values across calls as backing state changes.
pub trait UrlConfigProvider: Send + Sync {
    /// Stable name used in diagnostics and error messages.
    fn name(&self) -> &str;

    /// Fetch the current configuration fragment.
    fn url_config(&self) -> ConfigResult<UrlConfig>;
}

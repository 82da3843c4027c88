//! File-backed provider reading YAML or JSON fragments.

use super::UrlConfigProvider;
use crate::error::{ConfigError, ConfigResult};
use crate::types::{CustomUrl, ExcludedUrl, UrlConfig};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Raw fragment with optional fields so that a missing list can be
/// reported as a contract violation instead of a generic parse error.
#[derive(Debug, Deserialize)]
struct RawUrlConfig {
    excluded_urls: Option<Vec<ExcludedUrl>>,
    custom_urls: Option<Vec<CustomUrl>>,
}

impl RawUrlConfig {
    fn into_config(self) -> ConfigResult<UrlConfig> {
        let excluded_urls = self
            .excluded_urls
            .ok_or_else(|| ConfigError::missing_field("excluded_urls"))?;
        let custom_urls = self
            .custom_urls
            .ok_or_else(|| ConfigError::missing_field("custom_urls"))?;
        Ok(UrlConfig {
            excluded_urls,
            custom_urls,
        })
    }
}

/// Provider reading a fragment file on every fetch.
///
/// The format is chosen by extension: `.json` parses as JSON, anything
/// else as YAML. Re-reading per call means edits are observed by the
/// next aggregation without a restart.
#[derive(Debug, Clone)]
pub struct FileProvider {
    path: PathBuf,
    name: String,
}

impl FileProvider {
    /// Create a provider for the given fragment file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = format!("file:{}", path.display());
        Self { path, name }
    }

    /// The file this provider reads.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parse(&self, content: &str) -> ConfigResult<RawUrlConfig> {
        let is_json = self
            .path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));

        if is_json {
            serde_json::from_str(content)
                .map_err(|e| ConfigError::parse(self.path.display(), e))
        } else {
            serde_yaml::from_str(content)
                .map_err(|e| ConfigError::parse(self.path.display(), e))
        }
    }
}

impl UrlConfigProvider for FileProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn url_config(&self) -> ConfigResult<UrlConfig> {
        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| ConfigError::io(self.path.display(), e))?;
        self.parse(&content)?.into_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use tempfile::TempDir;

    fn write_fragment(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_yaml_fragment() {
        let temp = TempDir::new().unwrap();
        let path = write_fragment(
            &temp,
            "urls.yaml",
            r#"
excluded_urls:
  - pattern: "^/account/"
  - pattern: "^/cart"
    resource: checkout
custom_urls:
  - loc: https://shop.example.com/faq
    priority: 0.8
"#,
        );

        let provider = FileProvider::new(&path);
        let config = provider.url_config().unwrap();
        assert_eq!(config.excluded_urls.len(), 2);
        assert_eq!(config.excluded_urls[1].resource.as_deref(), Some("checkout"));
        assert_eq!(config.custom_urls[0].priority, 0.8);
    }

    #[test]
    fn test_json_fragment() {
        let temp = TempDir::new().unwrap();
        let path = write_fragment(
            &temp,
            "urls.json",
            r#"{
  "excluded_urls": [{"pattern": "^/admin/"}],
  "custom_urls": [{"loc": "https://shop.example.com/press"}]
}"#,
        );

        let config = FileProvider::new(&path).url_config().unwrap();
        assert_eq!(config.excluded_urls[0].pattern, "^/admin/");
        assert_eq!(config.custom_urls.len(), 1);
    }

    #[test]
    fn test_missing_list_is_contract_violation() {
        let temp = TempDir::new().unwrap();
        let path = write_fragment(
            &temp,
            "urls.yaml",
            "excluded_urls:\n  - pattern: \"^/x/\"\n",
        );

        let err = FileProvider::new(&path).url_config().unwrap_err();
        assert_eq!(err.code, ErrorCode::MissingField);
        assert_eq!(err.field.as_deref(), Some("custom_urls"));
    }

    #[test]
    fn test_missing_file_fails() {
        let temp = TempDir::new().unwrap();
        let err = FileProvider::new(temp.path().join("nope.yaml"))
            .url_config()
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::IoFailed);
    }

    #[test]
    fn test_invalid_yaml_fails() {
        let temp = TempDir::new().unwrap();
        let path = write_fragment(&temp, "urls.yaml", "excluded_urls: [::not yaml");
        let err = FileProvider::new(&path).url_config().unwrap_err();
        assert_eq!(err.code, ErrorCode::ParseFailed);
    }

    #[test]
    fn test_reread_per_call_observes_edits() {
        let temp = TempDir::new().unwrap();
        let path = write_fragment(
            &temp,
            "urls.yaml",
            "excluded_urls: []\ncustom_urls: []\n",
        );
        let provider = FileProvider::new(&path);
        assert!(provider.url_config().unwrap().custom_urls.is_empty());

        std::fs::write(
            &path,
            "excluded_urls: []\ncustom_urls:\n  - loc: https://shop.example.com/new\n",
        )
        .unwrap();
        assert_eq!(provider.url_config().unwrap().custom_urls.len(), 1);
    }
}

//! CLI configuration.

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use catalog_browse::BrowseSettings;
use catalog_core::search::SortOption;
use catalog_data::{ClientConfig, DEFAULT_BASE_URL};
use serde::{Deserialize, Serialize};

/// Config file names searched for, in order.
pub const CONFIG_NAMES: [&str; 3] = ["catalog.toml", ".catalog.toml", "catalog.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CliConfig {
    /// Product-data service settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Catalog page settings.
    #[serde(default)]
    pub catalog: CatalogConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Client settings.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.api.base_url.clone(),
            timeout: Duration::from_millis(self.api.timeout_ms),
        }
    }

    /// Catalog page settings.
    pub fn browse_settings(&self) -> Result<BrowseSettings> {
        let sort = self
            .catalog
            .default_sort
            .parse::<SortOption>()
            .map_err(|e| anyhow!("catalog.default_sort: {}", e))?;

        Ok(BrowseSettings::default()
            .with_page_size(self.catalog.page_size)
            .with_debounce(Duration::from_millis(self.catalog.debounce_ms))
            .with_default_sort(sort))
    }

    /// Check the config, returning `(errors, warnings)`.
    pub fn validate(&self) -> (Vec<String>, Vec<String>) {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        match url::Url::parse(&self.api.base_url) {
            Ok(url) if url.cannot_be_a_base() => {
                errors.push(format!("api.base_url '{}' cannot be a base URL", self.api.base_url))
            }
            Ok(url) if url.scheme() != "https" => {
                warnings.push(format!("api.base_url '{}' is not https", self.api.base_url))
            }
            Ok(_) => {}
            Err(e) => errors.push(format!("api.base_url is invalid: {}", e)),
        }

        if self.api.timeout_ms == 0 {
            errors.push("api.timeout_ms must be greater than 0".to_string());
        }

        if self.catalog.page_size == 0 {
            errors.push("catalog.page_size must be greater than 0".to_string());
        } else if self.catalog.page_size > 100 {
            warnings.push(format!(
                "catalog.page_size {} is larger than the service's usual page limit",
                self.catalog.page_size
            ));
        }

        if self.catalog.debounce_ms > 2000 {
            warnings.push(format!(
                "catalog.debounce_ms {} will make search feel unresponsive",
                self.catalog.debounce_ms
            ));
        }

        if let Err(e) = self.catalog.default_sort.parse::<SortOption>() {
            errors.push(format!("catalog.default_sort: {}", e));
        }

        (errors, warnings)
    }
}

/// Product-data service settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    /// Service base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

/// Catalog page settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogConfig {
    /// Products per page.
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Search debounce window in milliseconds.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Starting sort option.
    #[serde(default = "default_sort")]
    pub default_sort: String,
}

fn default_page_size() -> u32 {
    8
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_sort() -> String {
    SortOption::default().as_str().to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            debounce_ms: default_debounce_ms(),
            default_sort: default_sort(),
        }
    }
}

/// Generate a default catalog.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Catalog CLI configuration

[api]
base_url = "{base_url}"
timeout_ms = {timeout_ms}

[catalog]
page_size = {page_size}
debounce_ms = {debounce_ms}
# newest | oldest | price-asc | price-desc
default_sort = "{sort}"
"#,
        base_url = DEFAULT_BASE_URL,
        timeout_ms = default_timeout_ms(),
        page_size = default_page_size(),
        debounce_ms = default_debounce_ms(),
        sort = default_sort(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &tempfile::TempDir, name: &str, content: &str) -> String {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path.to_string_lossy().to_string()
    }

    #[test]
    fn test_default_config_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "catalog.toml", &generate_default_config());
        let config = CliConfig::load(&path).unwrap();
        assert_eq!(config, CliConfig::default());
        assert!(config.validate().0.is_empty());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "catalog.toml", "[catalog]\npage_size = 12\n");
        let config = CliConfig::load(&path).unwrap();
        assert_eq!(config.catalog.page_size, 12);
        assert_eq!(config.catalog.debounce_ms, 300);
        assert_eq!(config.api.base_url, "https://dummyjson.com");

        let settings = config.browse_settings().unwrap();
        assert_eq!(settings.page_size, 12);
        assert_eq!(settings.default_sort, SortOption::PriceAsc);
    }

    #[test]
    fn test_json_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "catalog.json",
            r#"{"api": {"base_url": "http://localhost:3000", "timeout_ms": 500}}"#,
        );
        let config = CliConfig::load(&path).unwrap();
        let client = config.client_config();
        assert_eq!(client.base_url, "http://localhost:3000");
        assert_eq!(client.timeout, Duration::from_millis(500));

        let (errors, warnings) = config.validate();
        assert!(errors.is_empty());
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_validate_reports_errors() {
        let mut config = CliConfig::default();
        config.api.base_url = "not a url".to_string();
        config.catalog.page_size = 0;
        config.catalog.default_sort = "rating".to_string();

        let (errors, _) = config.validate();
        assert_eq!(errors.len(), 3);
        assert!(config.browse_settings().is_err());
    }

    #[test]
    fn test_missing_file() {
        assert!(CliConfig::load("/nonexistent/catalog.toml").is_err());
    }
}

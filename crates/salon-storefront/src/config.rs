//! Storefront configuration.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use salon_data::Credentials;
use salon_observability::{CorrelationId, LogFormat, LogLevel, LogSink, StructuredLogger};
use serde::{Deserialize, Serialize};

/// Default catalog failure message.
pub const DEFAULT_ERROR_MESSAGE: &str = "Failed to load products. Please try again.";

/// Storefront configuration file. Every field has a default, so an empty
/// file is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Public origin used to build share links.
    #[serde(default = "default_site_url")]
    pub site_url: String,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub carousel: CarouselConfig,

    #[serde(default)]
    pub feedback: FeedbackConfig,

    #[serde(default)]
    pub blog: BlogConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_site_url() -> String {
    "http://localhost:3000".to_string()
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            site_url: default_site_url(),
            api: ApiConfig::default(),
            catalog: CatalogConfig::default(),
            carousel: CarouselConfig::default(),
            feedback: FeedbackConfig::default(),
            blog: BlogConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl StorefrontConfig {
    /// Load config from a file. `.json` files are read as JSON, anything
    /// else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Save config to a file, picking the format from the extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Root logger for one page visit.
    pub fn logger(&self) -> StructuredLogger {
        StructuredLogger::new(CorrelationId::generate())
            .with_min_level(self.logging.level)
            .with_format(self.logging.format)
            .with_sink(self.logging.sink())
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Product API settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL; endpoint paths such as `/products` are appended.
    #[serde(default = "default_api_base")]
    pub base_url: String,

    /// Send cookies with every API request.
    #[serde(default = "default_true")]
    pub include_credentials: bool,
}

fn default_api_base() -> String {
    "http://localhost:5000/api".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_base(),
            include_credentials: true,
        }
    }
}

impl ApiConfig {
    pub fn credentials(&self) -> Credentials {
        if self.include_credentials {
            Credentials::Include
        } else {
            Credentials::SameOrigin
        }
    }
}

/// Catalog page settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Message shown when the product list cannot be loaded.
    #[serde(default = "default_error_message")]
    pub error_message: String,
}

fn default_error_message() -> String {
    DEFAULT_ERROR_MESSAGE.to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            error_message: default_error_message(),
        }
    }
}

/// Featured carousel settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarouselConfig {
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    /// Products kept from the featured response.
    #[serde(default = "default_max_items")]
    pub max_items: usize,
}

fn default_interval_ms() -> u64 {
    4000
}

fn default_max_items() -> usize {
    4
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            max_items: default_max_items(),
        }
    }
}

impl CarouselConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

/// Transient message settings (share confirmation, form feedback).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackConfig {
    #[serde(default = "default_hide_after_ms")]
    pub hide_after_ms: u64,
}

fn default_hide_after_ms() -> u64 {
    2000
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            hide_after_ms: default_hide_after_ms(),
        }
    }
}

impl FeedbackConfig {
    pub fn hide_after(&self) -> Duration {
        Duration::from_millis(self.hide_after_ms)
    }
}

/// Blog admin settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogConfig {
    /// Simulated latency of the mock backend.
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,
}

fn default_latency_ms() -> u64 {
    800
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            latency_ms: default_latency_ms(),
        }
    }
}

impl BlogConfig {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

/// Logging settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub level: LogLevel,

    #[serde(default)]
    pub format: LogFormat,

    /// Forward entries to `tracing` instead of writing to stderr.
    #[serde(default)]
    pub use_tracing: bool,
}

impl LoggingConfig {
    fn sink(&self) -> LogSink {
        if self.use_tracing {
            LogSink::Tracing
        } else {
            LogSink::Stderr
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!(
            "salon-config-{}-{}",
            std::process::id(),
            name
        ))
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: StorefrontConfig = toml::from_str("").unwrap();
        assert_eq!(config, StorefrontConfig::default());
        assert_eq!(config.carousel.interval(), Duration::from_secs(4));
        assert_eq!(config.carousel.max_items, 4);
        assert_eq!(config.feedback.hide_after(), Duration::from_secs(2));
        assert_eq!(config.catalog.error_message, DEFAULT_ERROR_MESSAGE);
        assert_eq!(config.api.credentials(), Credentials::Include);
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config: StorefrontConfig = toml::from_str(
            r#"
site_url = "https://salon.example"

[api]
base_url = "https://api.salon.example"

[carousel]
interval_ms = 6000

[logging]
level = "debug"
format = "human"
"#,
        )
        .unwrap();
        assert_eq!(config.site_url, "https://salon.example");
        assert_eq!(config.api.base_url, "https://api.salon.example");
        assert!(config.api.include_credentials);
        assert_eq!(config.carousel.interval_ms, 6000);
        assert_eq!(config.carousel.max_items, 4);
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.logging.format, LogFormat::Human);
    }

    #[test]
    fn test_save_and_load_json() {
        let path = temp_path("config.json");
        let mut config = StorefrontConfig::default();
        config.blog.latency_ms = 10;
        config.save(&path).unwrap();

        let loaded = StorefrontConfig::load(&path).unwrap();
        assert_eq!(loaded.blog.latency(), Duration::from_millis(10));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_save_and_load_toml() {
        let path = temp_path("config.toml");
        let mut config = StorefrontConfig::default();
        config.api.include_credentials = false;
        config.save(&path).unwrap();

        let loaded = StorefrontConfig::load(&path).unwrap();
        assert_eq!(loaded.api.credentials(), Credentials::SameOrigin);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_missing_file_has_context() {
        let err = StorefrontConfig::load("/nonexistent/salon.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}

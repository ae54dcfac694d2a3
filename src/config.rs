//! Site configuration.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (SYLLABUS_CONTENT, SYLLABUS_PRICING_URL)
//! 2. Config file (syllabus.yaml in the working directory, or --config)
//! 3. Defaults

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Environment override for the content directory
pub const ENV_CONTENT: &str = "SYLLABUS_CONTENT";
/// Environment override for the pricing service base URL
pub const ENV_PRICING_URL: &str = "SYLLABUS_PRICING_URL";

const DEFAULT_CONFIG_FILE: &str = "syllabus.yaml";

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub site: SiteSection,
    #[serde(default)]
    pub paths: PathsSection,
    #[serde(default)]
    pub pricing: PricingSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SiteSection {
    pub name: Option<String>,
    pub url: Option<String>,
    pub language: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsSection {
    /// Content store root (relative paths resolve against the cwd)
    pub content: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PricingSection {
    pub base_url: Option<String>,
    /// Request timeout in seconds; 0 means unbounded
    pub timeout_secs: Option<u64>,
}

impl ConfigFile {
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_yaml::from_str(&raw).context("Failed to parse config YAML")
    }
}

/// Resolved site configuration
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Organization name for structured data
    pub site_name: String,

    /// Canonical site URL
    pub site_url: String,

    /// BCP 47 language tag for structured data
    pub language: String,

    /// Content store root directory
    pub content_dir: PathBuf,

    /// Pricing service base URL
    pub pricing_base_url: String,

    /// Pricing request bound; `None` waits indefinitely
    pub pricing_timeout: Option<Duration>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_name: "Syllabus".to_string(),
            site_url: "https://syllabus.example.com".to_string(),
            language: "en".to_string(),
            content_dir: PathBuf::from("content"),
            pricing_base_url: "http://127.0.0.1:9000".to_string(),
            pricing_timeout: Some(crate::pricing::DEFAULT_TIMEOUT),
        }
    }
}

impl SiteConfig {
    /// Load configuration: explicit file if given, otherwise
    /// `syllabus.yaml` when present, then apply environment overrides.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let file = match config_path {
            Some(path) => ConfigFile::from_file(path)?,
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.exists() {
                    ConfigFile::from_file(default)?
                } else {
                    ConfigFile::default()
                }
            }
        };
        Ok(Self::from_file_and_env(file))
    }

    /// Merge a parsed config file with environment overrides and defaults
    pub fn from_file_and_env(file: ConfigFile) -> Self {
        let defaults = Self::default();

        let content_dir = std::env::var(ENV_CONTENT)
            .ok()
            .map(PathBuf::from)
            .or(file.paths.content)
            .unwrap_or(defaults.content_dir);

        let pricing_base_url = std::env::var(ENV_PRICING_URL)
            .ok()
            .or(file.pricing.base_url)
            .unwrap_or(defaults.pricing_base_url);

        let pricing_timeout = match file.pricing.timeout_secs {
            Some(0) => None,
            Some(secs) => Some(Duration::from_secs(secs)),
            None => defaults.pricing_timeout,
        };

        Self {
            site_name: file.site.name.unwrap_or(defaults.site_name),
            site_url: file.site.url.unwrap_or(defaults.site_url),
            language: file.site.language.unwrap_or(defaults.language),
            content_dir,
            pricing_base_url,
            pricing_timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_file_empty() {
        let config = SiteConfig::from_file_and_env(ConfigFile::default());
        assert_eq!(config.language, "en");
        assert_eq!(config.pricing_timeout, Some(Duration::from_secs(10)));
    }

    #[test]
    fn test_file_values_win_over_defaults() {
        let file: ConfigFile = serde_yaml::from_str(
            r#"
site:
  name: The Valley
  url: https://valley.example.com
pricing:
  base_url: https://pay.example.com
  timeout_secs: 3
"#,
        )
        .unwrap();
        let config = SiteConfig::from_file_and_env(file);
        assert_eq!(config.site_name, "The Valley");
        assert_eq!(config.pricing_base_url, "https://pay.example.com");
        assert_eq!(config.pricing_timeout, Some(Duration::from_secs(3)));
    }

    #[test]
    fn test_zero_timeout_means_unbounded() {
        let file: ConfigFile = serde_yaml::from_str("pricing:\n  timeout_secs: 0\n").unwrap();
        let config = SiteConfig::from_file_and_env(file);
        assert_eq!(config.pricing_timeout, None);
    }
}

//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.brandlens.toml` files.

use crate::analysis::filter::{DEFAULT_BRAND_TERMS, DEFAULT_GENERIC_ADJECTIVES};
use crate::analysis::{GenericTermFilter, DEFAULT_TITLE_LIMIT, DEFAULT_TOP_N};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".brandlens.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Query settings.
    #[serde(default)]
    pub query: QueryConfig,

    /// Generic term filter settings.
    #[serde(default)]
    pub filter: FilterConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Brand reported when no query is given.
    #[serde(default = "default_brand")]
    pub default_brand: String,

    /// Number of brand queries run concurrently.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Brands highlighted in reports when present in the corpus.
    #[serde(default = "default_featured_brands")]
    pub featured_brands: Vec<String>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_brand: default_brand(),
            concurrency: default_concurrency(),
            featured_brands: default_featured_brands(),
        }
    }
}

fn default_brand() -> String {
    "nike".to_string()
}

fn default_concurrency() -> usize {
    4
}

fn default_featured_brands() -> Vec<String> {
    DEFAULT_BRAND_TERMS.iter().map(|s| s.to_string()).collect()
}

/// Query settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Number of adjectives ranked per brand.
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// Maximum article titles listed per adjective.
    #[serde(default = "default_title_limit")]
    pub title_limit: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            title_limit: default_title_limit(),
        }
    }
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

fn default_title_limit() -> usize {
    DEFAULT_TITLE_LIMIT
}

/// Generic term filter settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Adjectives (and brand names) never counted as adjectives.
    #[serde(default = "default_generic_adjectives")]
    pub generic_adjectives: Vec<String>,

    /// Also exclude every brand found in the corpus catalog.
    #[serde(default = "default_true")]
    pub exclude_catalog_brands: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            generic_adjectives: default_generic_adjectives(),
            exclude_catalog_brands: true,
        }
    }
}

fn default_generic_adjectives() -> Vec<String> {
    DEFAULT_GENERIC_ADJECTIVES
        .iter()
        .chain(DEFAULT_BRAND_TERMS)
        .map(|s| s.to_string())
        .collect()
}

fn default_true() -> bool {
    true
}

impl FilterConfig {
    /// Build the term filter, optionally extended with catalog brands.
    pub fn build_filter(&self, catalog_brands: &[String]) -> GenericTermFilter {
        let filter = GenericTermFilter::new(&self.generic_adjectives);
        if self.exclude_catalog_brands {
            filter.with_brands(catalog_brands)
        } else {
            filter
        }
    }
}

/// Report generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Rows shown in Markdown adjective tables (padded with blanks).
    #[serde(default = "default_table_rows")]
    pub table_rows: usize,

    /// Include the full brand catalog in every report.
    #[serde(default)]
    pub include_catalog: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            table_rows: default_table_rows(),
            include_catalog: false,
        }
    }
}

fn default_table_rows() -> usize {
    10
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        Self::load_from_dir(Path::new("."))
    }

    /// Try to load `.brandlens.toml` from a directory.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings, but only
    /// when they were given explicitly.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(top_n) = args.top_n {
            self.query.top_n = top_n;
        }
        if let Some(limit) = args.title_limit {
            self.query.title_limit = limit;
        }
        if let Some(concurrency) = args.concurrency {
            self.general.concurrency = concurrency;
        }
        if args.list_brands {
            self.report.include_catalog = true;
        }
        if args.keep_brand_adjectives {
            self.filter.exclude_catalog_brands = false;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.general.default_brand, "nike");
        assert_eq!(config.query.top_n, 10);
        assert_eq!(config.query.title_limit, 25);
        assert_eq!(config.report.table_rows, 10);
        assert!(config.filter.generic_adjectives.contains(&"new".to_string()));
        assert!(config
            .filter
            .generic_adjectives
            .contains(&"under armour".to_string()));
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[general]
default_brand = "hoka"
featured_brands = ["hoka", "on"]

[query]
top_n = 5

[filter]
generic_adjectives = ["new", "shiny"]
exclude_catalog_brands = false
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.general.default_brand, "hoka");
        assert_eq!(config.general.featured_brands, vec!["hoka", "on"]);
        assert_eq!(config.general.concurrency, 4);
        assert_eq!(config.query.top_n, 5);
        assert_eq!(config.query.title_limit, 25);
        assert_eq!(config.filter.generic_adjectives, vec!["new", "shiny"]);
        assert!(!config.filter.exclude_catalog_brands);
    }

    #[test]
    fn test_build_filter_with_catalog() {
        let catalog = vec!["brooks".to_string()];

        let config = FilterConfig::default();
        let filter = config.build_filter(&catalog);
        assert!(filter.is_excluded("Brooks"));
        assert!(filter.is_excluded("NEW"));

        let config = FilterConfig {
            exclude_catalog_brands: false,
            ..FilterConfig::default()
        };
        assert!(!config.build_filter(&catalog).is_excluded("brooks"));
    }

    #[test]
    fn test_load_from_dir() {
        let dir = TempDir::new().unwrap();
        assert!(Config::load_from_dir(dir.path()).unwrap().is_none());

        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "[query]\ntitle_limit = 3\n").unwrap();
        let config = Config::load_from_dir(dir.path()).unwrap().unwrap();
        assert_eq!(config.query.title_limit, 3);

        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "[query\n").unwrap();
        assert!(Config::load_from_dir(dir.path()).is_err());
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(!toml_str.is_empty());
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[query]"));
        assert!(toml_str.contains("[filter]"));
        assert!(toml_str.contains("[report]"));
    }
}

//! Configuration management with TOML, environment variables, and CLI overrides.

use crate::filters::FilterChain;
use crate::filters::FilterChainBuilder;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Catalog endpoint base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Proxy URL (e.g., socks5://host:port)
    #[serde(default)]
    pub proxy: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connect timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Number of products revealed per page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Output format
    #[serde(default)]
    pub format: OutputFormat,

    /// Directory holding the persisted wish list
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// URL scheme used for shared product links
    #[serde(default = "default_share_scheme")]
    pub share_scheme: String,

    /// Filter: minimum price
    #[serde(default)]
    pub min_price: Option<f64>,

    /// Filter: maximum price
    #[serde(default)]
    pub max_price: Option<f64>,

    /// Filter: minimum rating
    #[serde(default)]
    pub min_rating: Option<f64>,

    /// Filter: only products with stock left
    #[serde(default)]
    pub in_stock_only: bool,
}

fn default_base_url() -> String {
    "https://dummyjson.com".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_page_size() -> usize {
    crate::engine::DEFAULT_PAGE_SIZE
}

fn default_share_scheme() -> String {
    "shopfront".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            proxy: None,
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_timeout_secs(),
            page_size: default_page_size(),
            format: OutputFormat::Table,
            data_dir: None,
            share_scheme: default_share_scheme(),
            min_price: None,
            max_price: None,
            min_rating: None,
            in_stock_only: false,
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        // 1. Explicit path takes precedence
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        // 2. Try current directory
        let local_config = Path::new("config.toml");
        if local_config.exists() {
            debug!("Found config.toml in current directory");
            return Self::from_file(local_config);
        }

        // 3. Try XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("shopfront").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    pub fn with_env(mut self) -> Self {
        if let Ok(base_url) = std::env::var("SHOPFRONT_BASE_URL") {
            self.base_url = base_url;
        }

        if let Ok(proxy) = std::env::var("SHOPFRONT_PROXY") {
            self.proxy = Some(proxy);
        }

        if let Ok(page_size) = std::env::var("SHOPFRONT_PAGE_SIZE") {
            match page_size.parse::<usize>() {
                Ok(n) if n > 0 => self.page_size = n,
                _ => debug!("Ignoring invalid SHOPFRONT_PAGE_SIZE: {}", page_size),
            }
        }

        if let Ok(dir) = std::env::var("SHOPFRONT_DATA_DIR") {
            self.data_dir = Some(PathBuf::from(dir));
        }

        self
    }

    /// Resolves where the wish list is persisted.
    pub fn resolved_data_dir(&self) -> PathBuf {
        if let Some(dir) = &self.data_dir {
            return dir.clone();
        }

        dirs::data_dir()
            .map(|dir| dir.join("shopfront"))
            .unwrap_or_else(|| PathBuf::from(".shopfront"))
    }

    /// Builds the local facet filters configured here.
    pub fn filter_chain(&self) -> FilterChain {
        FilterChainBuilder::new()
            .price_range(self.min_price, self.max_price)
            .min_rating(self.min_rating)
            .in_stock_only(self.in_stock_only)
            .build()
    }
}

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Markdown,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown format: {}. Use: table, json, markdown, csv", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

//! Configuration for the listing demo.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Table display settings.
    #[serde(default)]
    pub display: DisplayConfig,
    /// Data source settings.
    #[serde(default)]
    pub data: DataConfig,
    /// Log settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// A missing file yields the defaults; a file that exists but does not
    /// parse is an error.
    pub fn load() -> anyhow::Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("parsing config {}", path.display()))
    }

    fn parse(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Save configuration to the default path.
    pub fn save(&self) -> anyhow::Result<()> {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let content = toml::to_string_pretty(self)?;
            std::fs::write(path, content)?;
        }
        Ok(())
    }

    /// Get configuration file path.
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "listing-demo")
            .map(|d| d.config_dir().join("config.toml"))
    }

    /// Log file to write to: the configured one, else the data directory.
    pub fn log_path(&self) -> PathBuf {
        self.logging
            .file
            .clone()
            .or_else(|| {
                directories::ProjectDirs::from("", "", "listing-demo")
                    .map(|d| d.data_dir().join("listing-demo.log"))
            })
            .unwrap_or_else(|| PathBuf::from("listing-demo.log"))
    }
}

/// Table display settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Rows per page on startup.
    #[serde(default = "default_per_page")]
    pub per_page: usize,
    /// Show the selection checkbox column.
    #[serde(default = "default_true")]
    pub checkbox: bool,
    /// Cells scrolled under a pinned group before its shadow shows.
    #[serde(default = "default_shadow_threshold")]
    pub shadow_threshold: u16,
    /// Message shown when no rows match.
    #[serde(default = "default_empty_message")]
    pub empty_message: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            per_page: default_per_page(),
            checkbox: true,
            shadow_threshold: default_shadow_threshold(),
            empty_message: default_empty_message(),
        }
    }
}

fn default_per_page() -> usize {
    10
}

fn default_true() -> bool {
    true
}

fn default_shadow_threshold() -> u16 {
    listing_widgets::SHADOW_THRESHOLD
}

fn default_empty_message() -> String {
    "No patients match the current filter".to_string()
}

/// Data source settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    /// JSON array of row objects to load instead of generated rows.
    #[serde(default)]
    pub fixture: Option<PathBuf>,
    /// Number of generated rows when no fixture is given.
    #[serde(default = "default_generated_rows")]
    pub generated_rows: usize,
    /// Simulated fetch latency in milliseconds.
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            fixture: None,
            generated_rows: default_generated_rows(),
            latency_ms: default_latency_ms(),
        }
    }
}

fn default_generated_rows() -> usize {
    137
}

fn default_latency_ms() -> u64 {
    250
}

/// Log settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is unset.
    #[serde(default = "default_level")]
    pub level: String,
    /// Log file; defaults to the data directory.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            file: None,
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

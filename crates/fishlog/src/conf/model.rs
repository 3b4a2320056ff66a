//! Model — FishlogConfig and related structs.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::parser::{DEFAULT_CACHE_CAPACITY, DEFAULT_YIELD_INTERVAL};
use crate::report::{RodFilter, SortKey, ViewMode};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FishlogConfig {
    /// Maximum number of distinct inputs kept in the record cache
    pub cache_capacity: usize,
    /// Lines between cooperative cancellation checks
    pub yield_interval: usize,
    pub output: OutputFormat,
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub view: ViewMode,
    pub sort: SortKey,
    pub descending: bool,
    /// Rod slots to include; empty means all
    pub rods: Vec<u32>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl Default for FishlogConfig {
    fn default() -> Self {
        Self {
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            yield_interval: DEFAULT_YIELD_INTERVAL,
            output: OutputFormat::Table,
            report: ReportConfig::default(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            view: ViewMode::Summary,
            sort: SortKey::None,
            descending: true,
            rods: Vec::new(),
        }
    }
}

impl ReportConfig {
    pub fn rod_filter(&self) -> RodFilter {
        RodFilter::only(self.rods.iter().copied())
    }
}

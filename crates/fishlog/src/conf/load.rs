//! Load — config loading from file and environment variables.

use std::path::Path;
use std::fs::File;
use std::io::Read;

use super::model::{ConfigError, FishlogConfig, OutputFormat};

const DEFAULT_CONFIG_PATH: &str = "fishlog.toml";

impl FishlogConfig {
    /// Load configuration from file or environment variables
    /// Priority: Environment Variables > Config File > Defaults
    ///
    /// An explicit `path` must exist; the default path is optional.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let explicit = path
            .map(str::to_string)
            .or_else(|| std::env::var("FISHLOG_CONFIG_FILE").ok());

        let mut config = match explicit {
            Some(path) => {
                tracing::info!("Loading configuration from: {}", path);
                Self::from_file(&path)?
            }
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                tracing::info!("Loading configuration from: {}", DEFAULT_CONFIG_PATH);
                Self::from_file(DEFAULT_CONFIG_PATH)?
            }
            None => {
                tracing::debug!("No config file found, using defaults");
                Self::default()
            }
        };

        config.apply_env();
        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let mut file = File::open(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|source| ConfigError::Io {
                path: path.to_string(),
                source,
            })?;

        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: FishlogConfig = toml::from_str(contents)?;
        Ok(config)
    }

    /// Environment variables override file config
    pub fn apply_env(&mut self) {
        if let Some(capacity) = env_parse("FISHLOG_CACHE_CAPACITY") {
            self.cache_capacity = capacity;
        }
        if let Some(interval) = env_parse("FISHLOG_YIELD_INTERVAL") {
            self.yield_interval = interval;
        }
        if let Ok(output) = std::env::var("FISHLOG_OUTPUT") {
            match output.to_ascii_lowercase().as_str() {
                "json" => self.output = OutputFormat::Json,
                "table" => self.output = OutputFormat::Table,
                other => tracing::warn!("Ignoring unknown FISHLOG_OUTPUT value: {}", other),
            }
        }
    }

    /// Validate that configuration values are sane
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cache_capacity == 0 {
            return Err(ConfigError::Invalid("cache_capacity must be > 0".to_string()));
        }
        if self.yield_interval == 0 {
            return Err(ConfigError::Invalid("yield_interval must be > 0".to_string()));
        }
        Ok(())
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|s| s.parse().ok())
}

//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use crate::dataset::{DatasetSource, Region, DEFAULT_SOURCE_URL};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub dataset: DatasetConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Dataset source configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetConfig {
    /// Local path or http(s) URL of the wildfire CSV
    #[serde(default = "default_source")]
    pub source: String,

    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,
}

fn default_source() -> String {
    DEFAULT_SOURCE_URL.to_string()
}

fn default_fetch_timeout() -> u64 {
    60
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            fetch_timeout_secs: default_fetch_timeout(),
        }
    }
}

impl DatasetConfig {
    /// Parsed dataset location
    pub fn source(&self) -> DatasetSource {
        DatasetSource::parse(&self.source)
    }

    /// Timeout for remote fetches
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8050
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Initial selector values
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_region")]
    pub default_region: Region,

    #[serde(default = "default_year")]
    pub default_year: i32,
}

fn default_region() -> Region {
    Region::NewSouthWales
}

fn default_year() -> i32 {
    2005
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_region: default_region(),
            default_year: default_year(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// "pretty" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    /// Whether structured JSON output was requested
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("wildfire-dashboard").join("config.toml")),
            Some(PathBuf::from("/etc/wildfire-dashboard/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key lookup
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // Dataset overrides
        if let Some(source) = lookup("WILDFIRE_DATA_SOURCE") {
            self.dataset.source = source;
        }

        // Server overrides
        if let Some(host) = lookup("WILDFIRE_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("WILDFIRE_PORT") {
            match port.parse() {
                Ok(p) => self.server.port = p,
                Err(_) => tracing::warn!("Ignoring invalid WILDFIRE_PORT: {}", port),
            }
        }

        // Dashboard overrides
        if let Some(region) = lookup("WILDFIRE_DEFAULT_REGION") {
            match region.parse() {
                Ok(r) => self.dashboard.default_region = r,
                Err(e) => tracing::warn!("Ignoring WILDFIRE_DEFAULT_REGION: {}", e),
            }
        }
        if let Some(year) = lookup("WILDFIRE_DEFAULT_YEAR") {
            match year.parse() {
                Ok(y) => self.dashboard.default_year = y,
                Err(_) => tracing::warn!("Ignoring invalid WILDFIRE_DEFAULT_YEAR: {}", year),
            }
        }

        // Logging overrides
        if let Some(level) = lookup("WILDFIRE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("WILDFIRE_LOG_FORMAT") {
            self.logging.format = format;
        }
    }

    /// Socket address string for the server
    pub fn addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    format!(
        r#"# Wildfire Dashboard Configuration
#
# Environment variables override these settings:
# - WILDFIRE_DATA_SOURCE
# - WILDFIRE_HOST
# - WILDFIRE_PORT
# - WILDFIRE_DEFAULT_REGION
# - WILDFIRE_DEFAULT_YEAR
# - WILDFIRE_LOG_LEVEL
# - WILDFIRE_LOG_FORMAT

[dataset]
# Local path or http(s) URL of the wildfire CSV
source = "{source}"

# Timeout for downloading a remote dataset (seconds)
fetch_timeout_secs = 60

[server]
# Address to bind to
host = "0.0.0.0"

# Port to listen on
port = 8050

[dashboard]
# Region selected on first load: NSW, NT, QL, SA, TA, VI or WA
default_region = "NSW"

# Year selected on first load (falls back to the earliest year in the data)
default_year = 2005

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#,
        source = DEFAULT_SOURCE_URL
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert_eq!(config.server.port, 8050);
        assert_eq!(config.dashboard.default_region, Region::NewSouthWales);
        assert_eq!(config.dashboard.default_year, 2005);
        assert!(matches!(config.dataset.source(), DatasetSource::Url(_)));
        assert!(!config.logging.is_json());
    }

    #[test]
    fn test_generated_config_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.dataset.source, DEFAULT_SOURCE_URL);
        assert_eq!(config.dashboard.default_region, Region::NewSouthWales);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = Config::parse(
            r#"
[dashboard]
default_region = "VI"

[dataset]
source = "./data/wildfires.csv"
"#,
        )
        .unwrap();

        assert_eq!(config.dashboard.default_region, Region::Victoria);
        assert_eq!(config.dashboard.default_year, 2005);
        assert_eq!(config.server.port, 8050);
        assert!(matches!(config.dataset.source(), DatasetSource::File(_)));
    }

    #[test]
    fn test_invalid_region_rejected() {
        assert!(Config::parse("[dashboard]\ndefault_region = \"ACT\"").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nport = 9000").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.addr(), "0.0.0.0:9000");
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/nonexistent/wildfire.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("WILDFIRE_PORT", "9100"),
            ("WILDFIRE_DEFAULT_REGION", "wa"),
            ("WILDFIRE_DEFAULT_YEAR", "not-a-year"),
            ("WILDFIRE_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.server.port, 9100);
        assert_eq!(config.dashboard.default_region, Region::WesternAustralia);
        assert_eq!(config.dashboard.default_year, 2005);
        assert!(config.logging.is_json());
    }
}

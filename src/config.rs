//! Client configuration.

use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DevToolsError, Result};

/// Environment variable holding a comma separated host list.
pub const HOSTS_ENV: &str = "ELASTICSEARCH_HOSTS";

/// Host used when none is configured.
pub const DEFAULT_HOST: &str = "localhost:9200";

/// Configuration handed to connections and the [`DevTools`](crate::client::DevTools) facade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Engine hosts (`host:port`).
    pub hosts: Vec<String>,
    /// Retries a transport may attempt per request.
    pub retries: u32,
    /// Index targeted by builders created from the facade.
    pub default_index: Option<String>,
    /// Page size used when none is given.
    pub per_page: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            hosts: vec![DEFAULT_HOST.to_string()],
            retries: 3,
            default_index: None,
            per_page: 25,
        }
    }
}

fn parse_hosts(hosts: &str) -> Vec<String> {
    hosts
        .split(',')
        .map(str::trim)
        .filter(|host| !host.is_empty())
        .map(String::from)
        .collect()
}

impl Config {
    /// Default configuration with environment overrides applied.
    pub fn from_env() -> Result<Self> {
        let mut config = Config::default();
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON configuration file; missing keys take their defaults and
    /// environment overrides are applied on top.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let mut config: Config = serde_json::from_str(&content).map_err(|e| {
            DevToolsError::config(format!("failed to parse {}: {e}", path.display()))
        })?;
        config.apply_env();
        config.validate()?;
        log::debug!("configuration loaded from {}", path.display());
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Ok(hosts) = env::var(HOSTS_ENV) {
            let hosts = parse_hosts(&hosts);
            if !hosts.is_empty() {
                self.hosts = hosts;
            }
        }
    }

    /// Check the configuration for unusable values.
    pub fn validate(&self) -> Result<()> {
        if self.hosts.is_empty() {
            return Err(DevToolsError::config("at least one host is required"));
        }
        if self.per_page == 0 {
            return Err(DevToolsError::config("per_page must be at least 1"));
        }
        if let Some(index) = &self.default_index {
            if index.trim().is_empty() {
                return Err(DevToolsError::config("default_index must not be empty"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.hosts, vec!["localhost:9200"]);
        assert_eq!(config.retries, 3);
        assert_eq!(config.per_page, 25);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_hosts() {
        assert_eq!(
            parse_hosts("es1:9200, es2:9200,,"),
            vec!["es1:9200", "es2:9200"]
        );
    }

    #[test]
    fn test_load_partial_file() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        write!(file, r#"{{"default_index": "products", "per_page": 10}}"#)?;

        let config = Config::load(file.path())?;
        assert_eq!(config.default_index.as_deref(), Some("products"));
        assert_eq!(config.per_page, 10);
        assert_eq!(config.retries, 3);
        Ok(())
    }

    #[test]
    fn test_load_invalid_file() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        write!(file, r#"{{"per_page": 0}}"#)?;
        assert!(matches!(
            Config::load(file.path()),
            Err(DevToolsError::Config(_))
        ));

        let mut garbage = NamedTempFile::new()?;
        write!(garbage, "not json")?;
        assert!(matches!(
            Config::load(garbage.path()),
            Err(DevToolsError::Config(_))
        ));
        Ok(())
    }
}

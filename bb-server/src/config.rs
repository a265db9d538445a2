use std::path::PathBuf;

use bb_client::source::DEFAULT_API_BASE;
use serde::Deserialize;

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub catalog: CatalogConfig,
    pub store: StoreConfig,
    pub reference: ReferenceConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load the configuration from a YAML file.
    pub fn load(yml_path: &str) -> anyhow::Result<Self> {
        let yml = std::fs::read_to_string(yml_path)?;
        Self::from_yaml(&yml)
    }

    /// Parse configuration text. Missing sections and fields take their defaults,
    /// so an empty document is a valid configuration.
    pub fn from_yaml(yml: &str) -> anyhow::Result<Self> {
        if yml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config = serde_yaml::from_str(yml)?;
        Ok(config)
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1:3000".into(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.into(),
            timeout_secs: 10,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: "data/backbar.db".into(),
        }
    }
}

/// Replacement brand and substitute tables. The built-in ones are used when unset.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ReferenceConfig {
    pub path: Option<PathBuf>,
}

/// Where to write JSON logs. Logs go to stdout when unset.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub directory: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_all_defaults() {
        let config = Config::from_yaml("").unwrap();
        assert_eq!(config.server.address, "127.0.0.1:3000");
        assert_eq!(config.catalog.base_url, DEFAULT_API_BASE);
        assert_eq!(config.catalog.timeout_secs, 10);
        assert_eq!(config.store.path, PathBuf::from("data/backbar.db"));
        assert!(config.reference.path.is_none());
        assert!(config.logging.directory.is_none());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = Config::from_yaml(
            "server:\n  address: 0.0.0.0:8080\ncatalog:\n  timeout_secs: 3\nlogging:\n  directory: /var/log/backbar\n",
        )
        .unwrap();
        assert_eq!(config.server.address, "0.0.0.0:8080");
        assert_eq!(config.catalog.timeout_secs, 3);
        assert_eq!(config.catalog.base_url, DEFAULT_API_BASE);
        assert_eq!(
            config.logging.directory,
            Some(PathBuf::from("/var/log/backbar"))
        );
    }

    #[test]
    fn unknown_types_are_rejected() {
        assert!(Config::from_yaml("catalog:\n  timeout_secs: soon\n").is_err());
    }
}

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration for Larder
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub store: StoreConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen port
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 3030 }
    }
}

/// Document-store gateway settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Base URL of the query gateway
    pub base_url: String,
    /// API key — literal value or "env:VAR_NAME" to read from environment
    pub api_key: Option<String>,
    /// Database holding the inventory container
    pub database: String,
    /// Container of ingested inventory documents
    pub container: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8081".to_string(),
            api_key: None,
            database: "InvoicesDB".to_string(),
            container: "Inventory".to_string(),
        }
    }
}

impl StoreConfig {
    /// Resolve the API key, supporting "env:VAR_NAME" syntax
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key.as_ref().and_then(|key| {
            if let Some(var_name) = key.strip_prefix("env:") {
                std::env::var(var_name).ok()
            } else if key.is_empty() {
                None
            } else {
                Some(key.clone())
            }
        })
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("Failed to parse config {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_sections() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 3030);
        assert_eq!(config.store.database, "InvoicesDB");
        assert_eq!(config.store.container, "Inventory");
        assert!(config.store.api_key.is_none());
    }

    #[test]
    fn partial_config_overrides_only_what_it_names() {
        let config: Config = toml::from_str(
            r#"
            [server]
            port = 9090

            [store]
            base_url = "https://store.internal"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.store.base_url, "https://store.internal");
        assert_eq!(config.store.database, "InvoicesDB");
    }

    #[test]
    fn api_key_env_indirection() {
        std::env::set_var("LARDER_TEST_STORE_KEY", "s3cret");
        let store = StoreConfig {
            api_key: Some("env:LARDER_TEST_STORE_KEY".to_string()),
            ..StoreConfig::default()
        };
        assert_eq!(store.resolve_api_key().as_deref(), Some("s3cret"));

        let literal = StoreConfig {
            api_key: Some("abc".to_string()),
            ..StoreConfig::default()
        };
        assert_eq!(literal.resolve_api_key().as_deref(), Some("abc"));

        let empty = StoreConfig {
            api_key: Some(String::new()),
            ..StoreConfig::default()
        };
        assert_eq!(empty.resolve_api_key(), None);
    }

    #[test]
    fn load_reads_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("larder.toml");
        std::fs::write(&path, "[server]\nport = 4000\n").unwrap();
        let config = Config::load(&path).unwrap();
        assert_eq!(config.server.port, 4000);
    }
}

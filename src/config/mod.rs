//! Configuration loading and management

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

/// Environment variable overriding `server.port`
pub const ENV_PORT: &str = "PORT";
/// Environment variable overriding `storage.uri`
pub const ENV_MONGODB_URI: &str = "MONGODB_URI";
/// Environment variable overriding `storage.database`
pub const ENV_DATABASE: &str = "PRODUCTS_DATABASE";

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

/// Which storage backs the products collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    #[default]
    InMemory,
    Mongodb,
}

/// Storage settings
///
/// `uri`, `database` and `collection` are only read by the MongoDB backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub uri: String,
    pub database: String,
    pub collection: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::InMemory,
            uri: "mongodb://localhost:27017".to_string(),
            database: "products".to_string(),
            collection: "products".to_string(),
        }
    }
}

/// Complete configuration of the service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
}

impl ServiceConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path, e))?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Default configuration: in-memory storage on 127.0.0.1:3000
    pub fn default_config() -> Self {
        Self::default()
    }

    /// Apply `PORT`, `MONGODB_URI` and `PRODUCTS_DATABASE` from the process
    /// environment
    pub fn apply_env_overrides(self) -> Result<Self> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup
    ///
    /// Empty values are ignored. A port that is not a valid `u16` is an error.
    pub fn apply_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(port) = lookup(ENV_PORT) {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|e| anyhow!("Invalid {} value '{}': {}", ENV_PORT, port, e))?;
        }
        if let Some(uri) = lookup(ENV_MONGODB_URI) {
            self.storage.uri = uri;
        }
        if let Some(database) = lookup(ENV_DATABASE) {
            self.storage.database = database;
        }

        Ok(self)
    }

    /// Address the server binds to, `host:port`
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

//! products-api binary
//!
//! Configuration comes from the YAML file named by `PRODUCTS_CONFIG` (or the
//! defaults), then `PORT`, `MONGODB_URI` and `PRODUCTS_DATABASE` from the
//! environment.

use anyhow::Result;
use products::config::{ServiceConfig, StorageBackend};
use products::server::ServerBuilder;
use products::storage::InMemoryProductStorage;
use tracing_subscriber::EnvFilter;

const CONFIG_ENV: &str = "PRODUCTS_CONFIG";
const DEFAULT_LOG_FILTER: &str = "products=info,products_api=info,tower_http=info";

fn load_config() -> Result<ServiceConfig> {
    let config = match std::env::var(CONFIG_ENV) {
        Ok(path) if !path.trim().is_empty() => {
            tracing::info!(path = %path, "Loading configuration");
            ServiceConfig::from_yaml_file(&path)?
        }
        _ => ServiceConfig::default_config(),
    };
    config.apply_env_overrides()
}

#[cfg(feature = "mongodb_backend")]
async fn mongo_builder(config: &ServiceConfig) -> Result<ServerBuilder> {
    use products::storage::MongoProductStorage;

    let client = mongodb::Client::with_uri_str(&config.storage.uri).await?;
    let storage = MongoProductStorage::with_collection(
        client.database(&config.storage.database),
        config.storage.collection.clone(),
    );
    storage.ensure_indexes().await?;

    tracing::info!(
        database = %config.storage.database,
        collection = %config.storage.collection,
        "Connected to MongoDB"
    );

    Ok(ServerBuilder::new().with_storage(storage))
}

#[cfg(not(feature = "mongodb_backend"))]
async fn mongo_builder(_config: &ServiceConfig) -> Result<ServerBuilder> {
    Err(anyhow::anyhow!(
        "storage backend 'mongodb' requires the 'mongodb_backend' feature"
    ))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = load_config()?;

    let builder = match config.storage.backend {
        StorageBackend::InMemory => {
            tracing::info!("Using in-memory storage");
            ServerBuilder::new().with_storage(InMemoryProductStorage::new())
        }
        StorageBackend::Mongodb => mongo_builder(&config).await?,
    };

    builder.serve(&config.bind_address()).await
}

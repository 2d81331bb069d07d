//! Gatehouse Store
//!
//! Infrastructure adapters and use cases for the Gatehouse domain.
//!
//! - `adapters/`: storage media, the JSON store adapter and the
//!   key-value backed [`GatewayRepository`](gatehouse::GatewayRepository)
//! - `application/`: [`GatewayService`], validation plus persistence
//! - `config`: [`StoreConfig`], environment driven settings
//! - `telemetry`: tracing subscriber setup

pub mod adapters;
pub mod application;
pub mod config;
pub mod telemetry;

use std::sync::Arc;

use anyhow::{Context, Result};

pub use adapters::{
    FileStorage, JsonStore, KvGatewayRepository, MemoryStorage, StorageError, StorageMedium,
    DEFAULT_STORAGE_KEY,
};
pub use application::GatewayService;
pub use config::StoreConfig;

/// Gateway service persisted under `config.storage_dir`
pub fn file_backed_service(
    config: &StoreConfig,
) -> Result<GatewayService<KvGatewayRepository<FileStorage>>> {
    let rules = config
        .validation_rules()
        .context("Failed to compile validation rules")?;
    let store = JsonStore::new(FileStorage::new(&config.storage_dir));
    let repo = KvGatewayRepository::with_key(store, config.storage_key.clone());

    tracing::info!(
        "Gateway catalog at {:?} under key {}",
        config.storage_dir,
        config.storage_key
    );

    Ok(GatewayService::new(Arc::new(repo), rules))
}

/// Gateway service over volatile in-memory storage
pub fn in_memory_service() -> GatewayService<KvGatewayRepository<MemoryStorage>> {
    let repo = KvGatewayRepository::new(JsonStore::new(MemoryStorage::new()));
    GatewayService::new(Arc::new(repo), gatehouse::ValidationRules::default())
}

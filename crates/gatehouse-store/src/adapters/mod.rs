//! Infrastructure Adapters
//!
//! Implementations of domain ports over local key-value storage.

pub mod json_store;
pub mod kv_gateway_repository;
pub mod storage;

// Re-exports
pub use json_store::JsonStore;
pub use kv_gateway_repository::{KvGatewayRepository, DEFAULT_STORAGE_KEY};
pub use storage::{FileStorage, MemoryStorage, StorageError, StorageMedium};

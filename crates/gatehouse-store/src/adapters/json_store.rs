//! JSON Store Adapter
//!
//! Encodes values as JSON on top of a [`StorageMedium`]. Reads fail soft:
//! text that does not decode is treated as an empty value instead of an
//! error, so a corrupted blob never locks the operator out.

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::storage::{StorageError, StorageMedium};

/// Key-value store adapter with JSON encoding
#[derive(Debug, Clone)]
pub struct JsonStore<M: StorageMedium> {
    medium: M,
}

impl<M: StorageMedium> JsonStore<M> {
    pub fn new(medium: M) -> Self {
        Self { medium }
    }

    pub fn medium(&self) -> &M {
        &self.medium
    }

    /// Decode the value stored under `key`.
    ///
    /// `Ok(None)` when nothing is stored. Undecodable text yields
    /// `Ok(Some(T::default()))`. Only medium faults are errors.
    pub fn read<T>(&self, key: &str) -> Result<Option<T>, StorageError>
    where
        T: DeserializeOwned + Default,
    {
        let Some(raw) = self.medium.get_item(key)? else {
            tracing::debug!("No value stored under {}", key);
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                tracing::warn!(
                    "Stored value under {} is not valid JSON ({}), recovering with an empty value",
                    key,
                    e
                );
                Ok(Some(T::default()))
            }
        }
    }

    /// Encode `value` and persist it under `key`
    pub fn write<T>(&self, key: &str, value: &T) -> Result<(), StorageError>
    where
        T: Serialize + ?Sized,
    {
        let encoded = serde_json::to_string(value).map_err(|source| StorageError::Serialize {
            key: key.to_string(),
            source,
        })?;
        self.medium.set_item(key, &encoded)
    }

    /// Remove any value stored under `key`
    pub fn clear(&self, key: &str) -> Result<(), StorageError> {
        self.medium.remove_item(key)
    }
}

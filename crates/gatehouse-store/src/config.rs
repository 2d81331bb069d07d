//! Store configuration
//!
//! Where the gateway collection lives and which serial number grammar
//! applies. Values come from defaults, builder calls, or the environment
//! (a `.env` file is honoured).

use std::path::PathBuf;

use anyhow::{Context, Result};

use gatehouse::{DomainError, ValidationRules, DEFAULT_SERIAL_NUMBER_PATTERN};

use crate::adapters::DEFAULT_STORAGE_KEY;

const ENV_STORAGE_DIR: &str = "GATEHOUSE_STORAGE_DIR";
const ENV_STORAGE_KEY: &str = "GATEHOUSE_STORAGE_KEY";
const ENV_SERIAL_PATTERN: &str = "GATEHOUSE_SERIAL_PATTERN";

/// Configuration for the persisted gateway catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Directory holding one JSON file per storage key
    pub storage_dir: PathBuf,
    /// Key under which the gateway collection is stored
    pub storage_key: String,
    /// Regular expression every serial number must match
    pub serial_number_pattern: String,
}

fn default_storage_dir() -> PathBuf {
    PathBuf::from("data")
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_dir: default_storage_dir(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            serial_number_pattern: DEFAULT_SERIAL_NUMBER_PATTERN.to_string(),
        }
    }
}

impl StoreConfig {
    /// Load configuration from the environment, falling back to defaults
    pub fn from_env() -> Result<Self> {
        // A missing .env file is not an error
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(dir) = lookup(ENV_STORAGE_DIR).filter(|v| !v.is_empty()) {
            config.storage_dir = PathBuf::from(dir);
        }
        if let Some(key) = lookup(ENV_STORAGE_KEY).filter(|v| !v.is_empty()) {
            config.storage_key = key;
        }
        if let Some(pattern) = lookup(ENV_SERIAL_PATTERN).filter(|v| !v.is_empty()) {
            config.serial_number_pattern = pattern;
        }

        config
            .validation_rules()
            .with_context(|| format!("Invalid {ENV_SERIAL_PATTERN}"))?;

        Ok(config)
    }

    /// Set the storage directory
    pub fn with_storage_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.storage_dir = dir.into();
        self
    }

    /// Set the storage key
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Set the serial number pattern
    pub fn with_serial_number_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.serial_number_pattern = pattern.into();
        self
    }

    /// Compile the validation rules this configuration describes
    pub fn validation_rules(&self) -> Result<ValidationRules, DomainError> {
        ValidationRules::new(&self.serial_number_pattern)
    }
}

//! Domain Errors
//!
//! Error types for domain operations.

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Gateway {serial_number} already holds the maximum of {limit} devices")]
    CapacityExceeded { serial_number: String, limit: usize },

    #[error("Repository error: {0}")]
    Repository(String),
}

impl DomainError {
    pub fn not_found_str<T: AsRef<str>>(entity_type: T, id: &str) -> Self {
        Self::NotFound {
            entity_type: entity_type.as_ref().to_string(),
            id: id.to_string(),
        }
    }

    pub fn gateway_not_found(serial_number: &str) -> Self {
        Self::not_found_str("Gateway", serial_number)
    }

    /// True for lookup misses, which callers usually present as
    /// "not registered" rather than as a failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

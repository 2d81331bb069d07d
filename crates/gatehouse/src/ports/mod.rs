//! Ports (Interfaces)
//!
//! Abstract interfaces that define how the domain layer
//! interacts with persistence.
//!
//! Implementations of these traits live in the infrastructure layer.

pub mod repositories;

// Re-exports
pub use repositories::*;

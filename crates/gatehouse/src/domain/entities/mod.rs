//! Domain Entities
//!
//! Pure domain models without infrastructure dependencies.
//! - Gateway: Top-level aggregate keyed by serial number
//! - Device: Endpoint owned by exactly one gateway

mod device;
mod gateway;

pub use device::*;
pub use gateway::*;

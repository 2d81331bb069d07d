//! Application Layer (Use Cases)
//!
//! Orchestrates domain validation and repository operations.

mod gateway_service;

pub use gateway_service::GatewayService;

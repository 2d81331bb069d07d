//! Repository Ports
//!
//! Abstract interfaces for data persistence operations.

mod gateway_repository;

pub use gateway_repository::*;

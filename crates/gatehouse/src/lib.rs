//! Gatehouse Domain Library
//!
//! Core domain types and interfaces for cataloging network gateways and
//! the devices attached to them.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain/`): Pure business entities and logic
//!   - `entities/`: Core domain models (Gateway, Device)
//!   - `value_objects/`: Immutable value types (DeviceStatus, Field)
//!   - `services/`: Field validation rules and form state
//!   - `errors/`: Domain-specific error types
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `repositories/`: Data access interfaces
//!
//! # Usage
//!
//! ```rust,ignore
//! use gatehouse::domain::{Gateway, Device, ValidationRules};
//! use gatehouse::ports::GatewayRepository;
//! ```

pub mod domain;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    is_unique_serial_number, Device, DeviceDraft, DeviceForm, DeviceStatus, DeviceUid,
    DomainError, Field, FieldErrors, Gateway, GatewayDraft, GatewayForm, ValidationRules,
    DEFAULT_SERIAL_NUMBER_PATTERN, MAX_DEVICES_PER_GATEWAY,
};
pub use ports::GatewayRepository;

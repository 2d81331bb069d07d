//! Value Objects
//!
//! Immutable objects defined by their attributes rather than identity.

mod device_status;
mod field;

pub use device_status::*;
pub use field::*;

//! Domain Services
//!
//! Stateless rules and input state that operate on domain types.

mod form;
mod validation;

pub use form::*;
pub use validation::*;

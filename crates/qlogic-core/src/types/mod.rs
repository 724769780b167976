//! Type system for qlogic
//!
//! This module contains the runtime type system including:
//! - Value types and their coercion rules
//! - Numeric parsing and formatting helpers
//! - Response state

pub mod number;
pub mod state;
pub mod value;

pub use state::ResponseState;
pub use value::Value;

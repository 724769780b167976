//! qlogic Core - Core types and definitions for the qlogic survey logic interpreter
//!
//! This crate provides the fundamental types used across the qlogic crates:
//! - Value types for respondent answers
//! - Response state (the caller-owned answer map)
//! - AST (Abstract Syntax Tree) definitions for logic expressions
//! - Error types

pub mod ast;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::CoreError;
pub use types::{ResponseState, Value};

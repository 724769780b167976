//! qlogic SDK
//!
//! High-level API for survey logic: relevance and screenout evaluation,
//! `{...}` piping into display text, authoring-time validation, and
//! seed-stable randomization.

pub mod builder;
pub mod config;
pub mod engine;
pub mod error;
pub mod piping;
pub mod validator;

// Re-export main types
pub use builder::ExpressionEngineBuilder;
pub use config::EngineConfig;
pub use engine::ExpressionEngine;
pub use error::{Result, SdkError};
pub use validator::{
    validate, Diagnostic, DiagnosticSeverity, ExpressionValidator, ValidationResult,
};

// Re-export commonly used types from dependencies
pub use qlogic_core::{ResponseState, Value};
pub use qlogic_runtime::{Randomizer, SeededRng};

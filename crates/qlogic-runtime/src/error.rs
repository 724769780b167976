//! Runtime error types

use thiserror::Error;

/// Runtime error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuntimeError {
    /// Expression tree deeper than the evaluation budget
    #[error("Evaluation nesting exceeds the limit of {limit}")]
    NestingTooDeep { limit: usize },

    /// A built-in function rejected one of its arguments
    #[error("Invalid argument to {function}(): {message}")]
    InvalidArgument { function: String, message: String },
}

/// Result type for runtime operations
pub type Result<T> = std::result::Result<T, RuntimeError>;

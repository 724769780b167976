//! Parser error types

use thiserror::Error;

/// Parser error
///
/// Only produced in strict mode, except [`ParseError::NestingTooDeep`] which
/// both modes report.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Nothing to parse
    #[error("Empty expression")]
    EmptyExpression,

    /// A token that does not fit the grammar at this point
    #[error("Unexpected token '{found}' at position {index}, expected {expected}")]
    UnexpectedToken {
        found: String,
        index: usize,
        expected: String,
    },

    /// Input ended where an operand or `)` was required
    #[error("Unexpected end of expression, expected {expected}")]
    UnexpectedEnd { expected: String },

    /// A quoted literal that never closes
    #[error("Unterminated string literal: {literal}")]
    UnterminatedString { literal: String },

    /// Tokens left over after a complete expression
    #[error("Unexpected trailing input '{found}' at position {index}")]
    TrailingInput { found: String, index: usize },

    /// Parenthesis/operator nesting exceeded the configured limit
    #[error("Expression nesting exceeds the limit of {limit}")]
    NestingTooDeep { limit: usize },
}

/// Result type for parser operations
pub type Result<T> = std::result::Result<T, ParseError>;

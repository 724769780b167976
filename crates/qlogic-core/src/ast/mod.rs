//! Abstract Syntax Tree definitions for logic expressions
//!
//! A relevance or screenout expression is parsed once into an [`Expression`]
//! tree; the runtime evaluates that tree either to a boolean or to a raw
//! [`Value`](crate::Value).

pub mod expression;
pub mod operator;

pub use expression::{Expression, UnaryOperator};
pub use operator::Operator;

/// Words that match the identifier grammar but are never variables
pub const KEYWORDS: [&str; 7] = ["AND", "OR", "NOT", "true", "false", "undefined", "null"];

/// Returns true if `word` is a reserved keyword (case-sensitive)
pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.contains(&word)
}

//! qlogic Parser - expression strings to AST
//!
//! This crate turns relevance, screenout and piping expressions into
//! [`qlogic_core::ast::Expression`] trees. Two modes share one grammar:
//! the lenient runtime mode never rejects syntax, the strict mode reports
//! every recovery as a [`ParseError`] for authoring tools.

pub mod error;
pub mod expression_parser;
pub mod lexer;

// Re-export main parser types
pub use error::{ParseError, Result};
pub use expression_parser::{ExpressionParser, ParseMode, DEFAULT_MAX_DEPTH};
pub use lexer::{Lexer, Symbol, Token};

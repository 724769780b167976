//! qlogic Runtime - evaluation of parsed survey logic
//!
//! This crate walks [`Expression`](qlogic_core::ast::Expression) trees
//! against a caller-owned [`ResponseState`](qlogic_core::ResponseState):
//! - Variable resolution with suffix stripping and naming-convention probing
//! - Operator semantics over the loose coercion rules
//! - The built-in function library
//! - Seed-stable randomization helpers for question and option ordering

pub mod context;
pub mod error;
pub mod evaluator;
pub mod functions;
pub mod random;
pub mod resolver;

mod operators;

// Re-export main runtime types
pub use context::FunctionContext;
pub use error::{Result, RuntimeError};
pub use evaluator::{Evaluator, DEFAULT_EVALUATION_DEPTH};
pub use functions::{BuiltinFunction, FunctionRegistry};
pub use random::{Randomizer, SeededRng};
pub use resolver::VariableResolver;

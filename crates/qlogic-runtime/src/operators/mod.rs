//! Operator execution modules
//!
//! Operators never fail: type mismatches coerce, and arithmetic faults
//! produce NaN.

mod binary;
mod comparison;
mod unary;

pub(crate) use binary::execute_binary_op;
pub(crate) use comparison::execute_compare;
pub(crate) use unary::execute_unary_op;

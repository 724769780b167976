//! Unary operator execution

use qlogic_core::ast::UnaryOperator;
use qlogic_core::Value;

/// Execute a unary operation
pub(crate) fn execute_unary_op(operand: Value, op: UnaryOperator) -> Value {
    match op {
        UnaryOperator::Not => Value::Bool(!operand.to_bool()),
        UnaryOperator::Negate => Value::Number(-operand.to_number()),
        UnaryOperator::Plus => operand,
    }
}

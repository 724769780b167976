//! Arithmetic operator execution

use qlogic_core::ast::Operator;
use qlogic_core::Value;

/// Execute an arithmetic operation
///
/// `+` concatenates when either side is a string. The other operators work on
/// the numeric coercions; division and modulo by zero yield NaN.
pub(crate) fn execute_binary_op(left: &Value, op: Operator, right: &Value) -> Value {
    if op == Operator::Add && (matches!(left, Value::String(_)) || matches!(right, Value::String(_))) {
        return Value::String(format!("{}{}", left, right));
    }

    let l = left.to_number();
    let r = right.to_number();

    let result = match op {
        Operator::Add => l + r,
        Operator::Sub => l - r,
        Operator::Mul => l * r,
        Operator::Div if r == 0.0 => f64::NAN,
        Operator::Div => l / r,
        Operator::Mod if r == 0.0 => f64::NAN,
        Operator::Mod => l % r,
        _ => {
            tracing::debug!("{} is not an arithmetic operator", op);
            f64::NAN
        }
    };

    Value::Number(result)
}

//! Comparison operator execution

use qlogic_core::ast::Operator;
use qlogic_core::Value;

/// Execute a comparison operation
///
/// Equality is loose across types. Relational operators compare numeric
/// coercions and are false when either side is absent or not a number.
pub(crate) fn execute_compare(left: &Value, op: Operator, right: &Value) -> bool {
    match op {
        Operator::Eq => return left.loose_eq(right),
        Operator::Ne => return !left.loose_eq(right),
        _ => {}
    }

    if left.is_absent() || right.is_absent() {
        tracing::trace!(
            "Absent operand in {} {} {}, returning false",
            left.type_name(),
            op,
            right.type_name()
        );
        return false;
    }

    let l = left.to_number();
    let r = right.to_number();
    match op {
        Operator::Lt => l < r,
        Operator::Gt => l > r,
        Operator::Le => l <= r,
        Operator::Ge => l >= r,
        _ => {
            tracing::debug!("{} is not a comparison operator", op);
            false
        }
    }
}

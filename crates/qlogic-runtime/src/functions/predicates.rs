//! Type tests and conversions

use super::{arg, FunctionRegistry};
use crate::context::FunctionContext;
use crate::error::Result;
use qlogic_core::types::number::{parse_leading_float, parse_leading_int, parse_strict};
use qlogic_core::Value;

pub(super) fn register(registry: &mut FunctionRegistry) {
    registry.register("is_empty", is_empty);
    registry.register("is_numeric", is_numeric);
    registry.register("is_null", is_null);
    registry.register("is_nan", is_nan);
    registry.register("is_int", is_int);
    registry.register("is_float", is_float);
    registry.register("is_string", is_string);
    registry.register("intval", intval);
    registry.register("floatval", floatval);
}

fn is_empty(args: &[Value], _: &mut FunctionContext) -> Result<Value> {
    Ok(Value::Bool(arg(args, 0).is_empty_value()))
}

/// Numbers, and strings that start with a number and parse fully as one
fn is_numeric(args: &[Value], _: &mut FunctionContext) -> Result<Value> {
    let numeric = match arg(args, 0) {
        Value::Number(_) => true,
        Value::String(s) => !parse_leading_float(s).is_nan() && parse_strict(s).is_finite(),
        _ => false,
    };
    Ok(Value::Bool(numeric))
}

fn is_null(args: &[Value], _: &mut FunctionContext) -> Result<Value> {
    Ok(Value::Bool(arg(args, 0).is_absent()))
}

fn is_nan(args: &[Value], _: &mut FunctionContext) -> Result<Value> {
    Ok(Value::Bool(matches!(arg(args, 0), Value::Number(n) if n.is_nan())))
}

fn is_int(args: &[Value], _: &mut FunctionContext) -> Result<Value> {
    Ok(Value::Bool(is_integral(arg(args, 0).to_number())))
}

/// A number with a fractional part; NaN and infinities count
fn is_float(args: &[Value], _: &mut FunctionContext) -> Result<Value> {
    Ok(Value::Bool(matches!(arg(args, 0), Value::Number(n) if !is_integral(*n))))
}

fn is_string(args: &[Value], _: &mut FunctionContext) -> Result<Value> {
    Ok(Value::Bool(matches!(arg(args, 0), Value::String(_))))
}

fn intval(args: &[Value], _: &mut FunctionContext) -> Result<Value> {
    Ok(Value::Number(zero_if_nan(parse_leading_int(&arg(args, 0).to_string()))))
}

fn floatval(args: &[Value], _: &mut FunctionContext) -> Result<Value> {
    Ok(Value::Number(zero_if_nan(parse_leading_float(&arg(args, 0).to_string()))))
}

fn is_integral(n: f64) -> bool {
    n.is_finite() && n.fract() == 0.0
}

fn zero_if_nan(n: f64) -> f64 {
    if n.is_nan() || n == 0.0 {
        0.0
    } else {
        n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(f: crate::functions::BuiltinFunction, args: &[Value]) -> Value {
        f(args, &mut FunctionContext::seeded(0)).unwrap()
    }

    #[test]
    fn test_is_empty() {
        assert_eq!(call(is_empty, &[]), Value::Bool(true));
        assert_eq!(call(is_empty, &[Value::from("")]), Value::Bool(true));
        assert_eq!(call(is_empty, &[Value::List(vec![])]), Value::Bool(true));
        assert_eq!(call(is_empty, &[Value::from(0)]), Value::Bool(false));
        assert_eq!(call(is_empty, &[Value::from(" ")]), Value::Bool(false));
    }

    #[test]
    fn test_is_numeric() {
        assert_eq!(call(is_numeric, &[Value::from(1.5)]), Value::Bool(true));
        assert_eq!(call(is_numeric, &[Value::from(" 42 ")]), Value::Bool(true));
        assert_eq!(call(is_numeric, &[Value::from("42abc")]), Value::Bool(false));
        assert_eq!(call(is_numeric, &[Value::from("")]), Value::Bool(false));
        assert_eq!(call(is_numeric, &[Value::from("Infinity")]), Value::Bool(false));
        assert_eq!(call(is_numeric, &[Value::from(true)]), Value::Bool(false));
    }

    #[test]
    fn test_number_kinds() {
        assert_eq!(call(is_int, &[Value::from("4")]), Value::Bool(true));
        assert_eq!(call(is_int, &[Value::from("")]), Value::Bool(true));
        assert_eq!(call(is_int, &[Value::from(4.5)]), Value::Bool(false));
        assert_eq!(call(is_float, &[Value::from(4.5)]), Value::Bool(true));
        assert_eq!(call(is_float, &[Value::from("4.5")]), Value::Bool(false));
        assert_eq!(call(is_nan, &[Value::Number(f64::NAN)]), Value::Bool(true));
        assert_eq!(call(is_nan, &[Value::from("x")]), Value::Bool(false));
        assert_eq!(call(is_null, &[Value::Absent]), Value::Bool(true));
        assert_eq!(call(is_string, &[Value::from("")]), Value::Bool(true));
    }

    #[test]
    fn test_conversions() {
        assert_eq!(call(intval, &[Value::from("12.9kg")]), Value::from(12));
        assert_eq!(call(intval, &[Value::from("-3.9")]), Value::from(-3));
        assert_eq!(call(intval, &[Value::from("abc")]), Value::from(0));
        assert_eq!(call(intval, &[Value::Absent]), Value::from(0));
        assert_eq!(call(floatval, &[Value::from(" 2.5e1x")]), Value::from(25));
        assert_eq!(call(floatval, &[Value::from(true)]), Value::from(0));
    }
}

//! Math functions

use super::{arg, FunctionRegistry};
use crate::context::FunctionContext;
use crate::error::Result;
use qlogic_core::types::number::round_half_up;
use qlogic_core::Value;

pub(super) fn register(registry: &mut FunctionRegistry) {
    registry.register("abs", |args, _| unary(args, f64::abs));
    registry.register("ceil", |args, _| unary(args, f64::ceil));
    registry.register("floor", |args, _| unary(args, f64::floor));
    registry.register("sqrt", |args, _| unary(args, f64::sqrt));
    registry.register("exp", |args, _| unary(args, f64::exp));
    registry.register("log", |args, _| unary(args, f64::ln));
    registry.register("log10", |args, _| unary(args, f64::log10));
    registry.register("sin", |args, _| unary(args, f64::sin));
    registry.register("cos", |args, _| unary(args, f64::cos));
    registry.register("tan", |args, _| unary(args, f64::tan));
    registry.register("asin", |args, _| unary(args, f64::asin));
    registry.register("acos", |args, _| unary(args, f64::acos));
    registry.register("atan", |args, _| unary(args, f64::atan));
    registry.register("atan2", atan2);
    registry.register("pi", |_, _| Ok(Value::Number(std::f64::consts::PI)));
    registry.register("round", round);
    registry.register("min", min);
    registry.register("max", max);
    registry.register("pow", pow);
    registry.register("rand", rand);
}

fn unary(args: &[Value], f: fn(f64) -> f64) -> Result<Value> {
    Ok(Value::Number(f(arg(args, 0).to_number())))
}

fn atan2(args: &[Value], _: &mut FunctionContext) -> Result<Value> {
    let y = arg(args, 0).to_number();
    let x = arg(args, 1).to_number();
    Ok(Value::Number(y.atan2(x)))
}

/// `round(value, precision = 0)`, half toward positive infinity after scaling
fn round(args: &[Value], _: &mut FunctionContext) -> Result<Value> {
    let value = arg(args, 0).to_number();
    let precision = match arg(args, 1) {
        Value::Absent => 0.0,
        p => p.to_number(),
    };

    let multiplier = if precision.fract() == 0.0 && precision.abs() <= f64::from(i32::MAX) {
        10f64.powi(precision as i32)
    } else {
        10f64.powf(precision)
    };
    Ok(Value::Number(round_half_up(value * multiplier) / multiplier))
}

/// Smallest argument; NaN if any argument is not a number, +inf with none
fn min(args: &[Value], _: &mut FunctionContext) -> Result<Value> {
    Ok(Value::Number(fold_numbers(args, f64::INFINITY, f64::min)))
}

/// Largest argument; NaN if any argument is not a number, -inf with none
fn max(args: &[Value], _: &mut FunctionContext) -> Result<Value> {
    Ok(Value::Number(fold_numbers(args, f64::NEG_INFINITY, f64::max)))
}

fn fold_numbers(args: &[Value], init: f64, pick: fn(f64, f64) -> f64) -> f64 {
    let mut acc = init;
    for value in args {
        let n = value.to_number();
        if n.is_nan() {
            return f64::NAN;
        }
        acc = pick(acc, n);
    }
    acc
}

fn pow(args: &[Value], _: &mut FunctionContext) -> Result<Value> {
    let base = arg(args, 0).to_number();
    let exponent = arg(args, 1).to_number();

    // 1 and -1 raised to NaN or an infinite power are undefined
    if base.abs() == 1.0 && !exponent.is_finite() {
        return Ok(Value::Number(f64::NAN));
    }
    Ok(Value::Number(base.powf(exponent)))
}

/// `rand()` draws from `[0, 1)`, `rand(min, max)` from `[min, max)`.
///
/// A zero or non-numeric `min` means 0 and a zero or non-numeric `max`
/// means 1.
fn rand(args: &[Value], context: &mut FunctionContext) -> Result<Value> {
    let r = context.random();
    if args.is_empty() {
        return Ok(Value::Number(r));
    }

    let min = nonzero_or(arg(args, 0).to_number(), 0.0);
    let max = nonzero_or(arg(args, 1).to_number(), 1.0);
    Ok(Value::Number(r * (max - min) + min))
}

fn nonzero_or(n: f64, default: f64) -> f64 {
    if n.is_nan() || n == 0.0 {
        default
    } else {
        n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(name: &str, args: &[Value]) -> f64 {
        let mut context = FunctionContext::seeded(42);
        FunctionRegistry::builtin()
            .call(name, args, &mut context)
            .unwrap()
            .to_number()
    }

    #[test]
    fn test_round() {
        assert_eq!(call("round", &[Value::from(2.5)]), 3.0);
        assert_eq!(call("round", &[Value::from(-2.5)]), -2.0);
        assert_eq!(call("round", &[Value::from(1.2345), Value::from(2)]), 1.23);
        assert_eq!(call("round", &[Value::from(1250), Value::from(-2)]), 1300.0);
        // 2.345 * 100 is 234.49999999999997
        assert_eq!(call("round", &[Value::from(2.345), Value::from(2)]), 2.34);
    }

    #[test]
    fn test_min_max() {
        let args = [Value::from(3), Value::from("1"), Value::from(2)];
        assert_eq!(call("min", &args), 1.0);
        assert_eq!(call("max", &args), 3.0);
        assert_eq!(call("min", &[]), f64::INFINITY);
        assert_eq!(call("max", &[]), f64::NEG_INFINITY);
        assert!(call("max", &[Value::from(1), Value::from("x")]).is_nan());
    }

    #[test]
    fn test_pow_and_unary() {
        assert_eq!(call("pow", &[Value::from(2), Value::from(10)]), 1024.0);
        assert!(call("pow", &[Value::from(1), Value::Number(f64::INFINITY)]).is_nan());
        assert_eq!(call("pow", &[Value::from(5), Value::from(0)]), 1.0);
        assert_eq!(call("abs", &[Value::from("-4")]), 4.0);
        assert_eq!(call("ceil", &[Value::from(1.1)]), 2.0);
        assert_eq!(call("floor", &[Value::from(-1.1)]), -2.0);
        assert_eq!(call("sqrt", &[Value::from(9)]), 3.0);
        assert_eq!(call("log10", &[Value::from(1000)]), 3.0);
        assert!(call("sqrt", &[]).is_nan());
        assert_eq!(call("pi", &[]), std::f64::consts::PI);
        assert_eq!(call("atan2", &[Value::from(0), Value::from(1)]), 0.0);
    }

    #[test]
    fn test_rand_ranges() {
        let mut context = FunctionContext::seeded(9);
        for _ in 0..50 {
            let r = rand(&[], &mut context).unwrap().to_number();
            assert!((0.0..1.0).contains(&r));

            let r = rand(&[Value::from(5), Value::from(10)], &mut context)
                .unwrap()
                .to_number();
            assert!((5.0..10.0).contains(&r));
        }

        // min == max pins the result
        let pinned = rand(&[Value::from(1), Value::from(1)], &mut context).unwrap();
        assert_eq!(pinned, Value::from(1));
    }
}

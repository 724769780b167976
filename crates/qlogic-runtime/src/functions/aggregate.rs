//! Aggregate and conditional functions

use super::{arg, FunctionRegistry};
use crate::context::FunctionContext;
use crate::error::Result;
use qlogic_core::Value;

pub(super) fn register(registry: &mut FunctionRegistry) {
    registry.register("count", count);
    registry.register("sum", sum);
    registry.register("avg", avg);
    registry.register("countif", countif);
    registry.register("sumif", sumif);
    registry.register("if", choose);
    registry.register("iif", choose);
}

/// Number of arguments that are neither absent nor the empty string
fn count(args: &[Value], _: &mut FunctionContext) -> Result<Value> {
    let n = args
        .iter()
        .filter(|v| !v.is_absent() && v.as_str() != Some(""))
        .count();
    Ok(Value::Number(n as f64))
}

/// Sum of the numeric coercions, non-numbers counting as 0
fn sum(args: &[Value], _: &mut FunctionContext) -> Result<Value> {
    let total = args
        .iter()
        .map(Value::to_number)
        .filter(|n| !n.is_nan())
        .sum::<f64>();
    Ok(Value::Number(total))
}

/// Mean of the arguments that coerce to numbers, 0 when there are none
fn avg(args: &[Value], _: &mut FunctionContext) -> Result<Value> {
    let numbers: Vec<f64> = args
        .iter()
        .map(Value::to_number)
        .filter(|n| !n.is_nan())
        .collect();
    if numbers.is_empty() {
        return Ok(Value::Number(0.0));
    }
    Ok(Value::Number(numbers.iter().sum::<f64>() / numbers.len() as f64))
}

/// Split `values..., condition` and keep the values loosely equal to it
fn matching(args: &[Value]) -> Option<impl Iterator<Item = &Value>> {
    let (condition, values) = args.split_last()?;
    if values.is_empty() {
        return None;
    }
    Some(values.iter().filter(move |v| v.loose_eq(condition)))
}

fn countif(args: &[Value], _: &mut FunctionContext) -> Result<Value> {
    let n = matching(args).map_or(0, |values| values.count());
    Ok(Value::Number(n as f64))
}

fn sumif(args: &[Value], _: &mut FunctionContext) -> Result<Value> {
    let total = matching(args).map_or(0.0, |values| values.map(Value::to_number).sum());
    Ok(Value::Number(total))
}

/// `if(condition, then, else)`; a missing branch is absent
fn choose(args: &[Value], _: &mut FunctionContext) -> Result<Value> {
    let branch = if arg(args, 0).to_bool() { 1 } else { 2 };
    Ok(arg(args, branch).clone())
}

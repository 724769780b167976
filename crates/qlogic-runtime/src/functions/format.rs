//! Number formatting and pattern matching

use super::{arg, FunctionRegistry};
use crate::context::FunctionContext;
use crate::error::{Result, RuntimeError};
use qlogic_core::types::number::to_fixed;
use qlogic_core::Value;
use regex::Regex;

pub(super) fn register(registry: &mut FunctionRegistry) {
    registry.register("number_format", number_format);
    registry.register("regexmatch", regex_match);
}

/// `number_format(num, decimals = 0, dec_point = '.', thousands_sep = ',')`
fn number_format(args: &[Value], _: &mut FunctionContext) -> Result<Value> {
    let number = arg(args, 0).to_number();
    let decimals = match arg(args, 1) {
        Value::Absent => 0.0,
        d => d.to_number(),
    };
    let decimals = if decimals.is_nan() { 0.0 } else { decimals.trunc() };
    if !(0.0..=100.0).contains(&decimals) {
        return Err(RuntimeError::InvalidArgument {
            function: "number_format".to_string(),
            message: format!("decimals must be between 0 and 100, got {}", decimals),
        });
    }

    let dec_point = text_or(arg(args, 2), ".");
    let thousands_sep = text_or(arg(args, 3), ",");

    let fixed = to_fixed(number, decimals as usize);
    let (int_part, dec_part) = match fixed.split_once('.') {
        Some((int_part, dec_part)) => (int_part, dec_part),
        None => (fixed.as_str(), ""),
    };

    let mut out = group_digits(int_part, &thousands_sep);
    if !dec_part.is_empty() {
        out.push_str(&dec_point);
        out.push_str(dec_part);
    }
    Ok(Value::String(out))
}

fn text_or(value: &Value, default: &str) -> String {
    match value {
        Value::Absent => default.to_string(),
        v => v.to_string(),
    }
}

/// Insert `sep` between groups of three in every run of digits
fn group_digits(s: &str, sep: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len() + sep.len() * (s.len() / 3));

    for (i, c) in chars.iter().enumerate() {
        if c.is_ascii_digit() && i > 0 && chars[i - 1].is_ascii_digit() {
            let remaining = chars[i..].iter().take_while(|d| d.is_ascii_digit()).count();
            if remaining % 3 == 0 {
                out.push_str(sep);
            }
        }
        out.push(*c);
    }
    out
}

/// `regexMatch(pattern, subject)`; an invalid pattern never matches.
///
/// Patterns use the `regex` crate dialect, which has no lookaround or
/// backreferences. Stored patterns that rely on them fail to compile and
/// read as no match.
fn regex_match(args: &[Value], _: &mut FunctionContext) -> Result<Value> {
    let pattern = arg(args, 0).to_string();
    let subject = arg(args, 1).to_string();

    match Regex::new(&pattern) {
        Ok(regex) => Ok(Value::Bool(regex.is_match(&subject))),
        Err(e) => {
            tracing::debug!("Invalid pattern '{}': {}", pattern, e);
            Ok(Value::Bool(false))
        }
    }
}

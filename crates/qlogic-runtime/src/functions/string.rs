//! String functions
//!
//! Lengths and indices count Unicode scalar values. Absent arguments read as
//! the empty string.

use super::{arg, FunctionRegistry};
use crate::context::FunctionContext;
use crate::error::Result;
use qlogic_core::Value;

pub(super) fn register(registry: &mut FunctionRegistry) {
    registry.register("strlen", strlen);
    registry.register("substr", substr);
    registry.register("trim", |args, _| map_text(args, |s| s.trim().to_string()));
    registry.register("ltrim", |args, _| map_text(args, |s| s.trim_start().to_string()));
    registry.register("rtrim", |args, _| map_text(args, |s| s.trim_end().to_string()));
    registry.register("strtoupper", |args, _| map_text(args, str::to_uppercase));
    registry.register("strtolower", |args, _| map_text(args, str::to_lowercase));
    registry.register("ucwords", |args, _| map_text(args, ucwords));
    registry.register("strrev", |args, _| map_text(args, |s| s.chars().rev().collect()));
    registry.register("str_replace", str_replace);
    registry.register("implode", implode);
    registry.register("join", implode);
}

fn text(args: &[Value], index: usize) -> String {
    arg(args, index).to_string()
}

fn map_text(args: &[Value], f: fn(&str) -> String) -> Result<Value> {
    Ok(Value::String(f(&text(args, 0))))
}

fn strlen(args: &[Value], _: &mut FunctionContext) -> Result<Value> {
    Ok(Value::Number(text(args, 0).chars().count() as f64))
}

/// `substr(str, start, length?)` with substring clamping: NaN and negative
/// bounds become 0, bounds past the end become the length, and reversed
/// bounds swap.
fn substr(args: &[Value], _: &mut FunctionContext) -> Result<Value> {
    let chars: Vec<char> = text(args, 0).chars().collect();
    let len = chars.len();

    let start = arg(args, 1).to_number();
    let start = if start.is_nan() { 0.0 } else { start };
    let end = match arg(args, 2) {
        Value::Absent => len as f64,
        length => start + length.to_number(),
    };

    let mut from = clamp_index(start, len);
    let mut to = clamp_index(end, len);
    if from > to {
        std::mem::swap(&mut from, &mut to);
    }
    Ok(Value::String(chars[from..to].iter().collect()))
}

fn clamp_index(n: f64, len: usize) -> usize {
    if n.is_nan() || n <= 0.0 {
        0
    } else if n >= len as f64 {
        len
    } else {
        n.trunc() as usize
    }
}

/// Upper-case every ASCII word character that starts a word
fn ucwords(s: &str) -> String {
    let is_word = |c: char| c.is_ascii_alphanumeric() || c == '_';
    let mut out = String::with_capacity(s.len());
    let mut previous_is_word = false;
    for c in s.chars() {
        if is_word(c) && !previous_is_word {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
        previous_is_word = is_word(c);
    }
    out
}

/// `str_replace(search, replace, subject)`, literal and global
fn str_replace(args: &[Value], _: &mut FunctionContext) -> Result<Value> {
    let search = text(args, 0);
    let replace = text(args, 1);
    let subject = text(args, 2);

    if search.is_empty() {
        let pieces: Vec<String> = subject.chars().map(String::from).collect();
        return Ok(Value::String(pieces.join(&replace)));
    }
    Ok(Value::String(subject.replace(&search, &replace)))
}

/// `implode(separator, item...)`; an absent separator is `,`
fn implode(args: &[Value], _: &mut FunctionContext) -> Result<Value> {
    let separator = match arg(args, 0) {
        Value::Absent => ",".to_string(),
        sep => sep.to_string(),
    };
    let items: Vec<String> = args.iter().skip(1).map(Value::to_string).collect();
    Ok(Value::String(items.join(&separator)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(name: &str, args: &[Value]) -> String {
        let mut context = FunctionContext::seeded(0);
        FunctionRegistry::builtin()
            .call(name, args, &mut context)
            .unwrap()
            .to_string()
    }

    #[test]
    fn test_strlen_counts_chars() {
        assert_eq!(call("strlen", &[Value::from("héllo")]), "5");
        assert_eq!(call("strlen", &[Value::Absent]), "0");
        assert_eq!(call("strlen", &[Value::from(123.5)]), "5");
    }

    #[test]
    fn test_substr() {
        let s = Value::from("Hello World");
        assert_eq!(call("substr", &[s.clone(), Value::from(6)]), "World");
        assert_eq!(call("substr", &[s.clone(), Value::from(0), Value::from(5)]), "Hello");
        assert_eq!(call("substr", &[s.clone(), Value::from(-3), Value::from(5)]), "He");
        assert_eq!(call("substr", &[s.clone(), Value::from(4), Value::from(-2)]), "ll");
        assert_eq!(call("substr", &[s.clone(), Value::from(20)]), "");
        assert_eq!(call("substr", &[s, Value::from("x")]), "Hello World");
    }

    #[test]
    fn test_case_and_trim() {
        assert_eq!(call("trim", &[Value::from("  a b  ")]), "a b");
        assert_eq!(call("ltrim", &[Value::from("  a ")]), "a ");
        assert_eq!(call("rtrim", &[Value::from(" a  ")]), " a");
        assert_eq!(call("strtoupper", &[Value::from("abc")]), "ABC");
        assert_eq!(call("strtolower", &[Value::from("ABC")]), "abc");
        assert_eq!(call("ucwords", &[Value::from("hello big-world o'neil")]), "Hello Big-World O'Neil");
        assert_eq!(call("strrev", &[Value::from("abc")]), "cba");
    }

    #[test]
    fn test_str_replace() {
        let args = [Value::from("o"), Value::from("0"), Value::from("foo boo")];
        assert_eq!(call("str_replace", &args), "f00 b00");

        let args = [Value::from(""), Value::from("-"), Value::from("abc")];
        assert_eq!(call("str_replace", &args), "a-b-c");

        let args = [Value::from("."), Value::from("!"), Value::from("a.b")];
        assert_eq!(call("str_replace", &args), "a!b");
    }

    #[test]
    fn test_implode() {
        let args = [Value::from(" | "), Value::from("A1"), Value::Absent, Value::from(3)];
        assert_eq!(call("implode", &args), "A1 |  | 3");

        let args = [Value::Absent, Value::from("x"), Value::from("y")];
        assert_eq!(call("join", &args), "x,y");
        assert_eq!(call("join", &[Value::from(",")]), "");
    }
}

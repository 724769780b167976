//! Built-in function library
//!
//! Every function takes its already-evaluated arguments and returns a value.
//! Names are case-insensitive: the registry stores them lowercased and the
//! parser lowercases call sites. Missing arguments read as absent.

mod aggregate;
mod format;
mod math;
mod predicates;
mod string;

use crate::context::FunctionContext;
use crate::error::Result;
use qlogic_core::Value;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Signature shared by all built-in functions
pub type BuiltinFunction = fn(&[Value], &mut FunctionContext) -> Result<Value>;

static BUILTINS: LazyLock<FunctionRegistry> = LazyLock::new(FunctionRegistry::with_builtins);

static ABSENT: Value = Value::Absent;

/// Argument `index`, absent when not supplied
pub(crate) fn arg(args: &[Value], index: usize) -> &Value {
    args.get(index).unwrap_or(&ABSENT)
}

/// Name-to-function table
#[derive(Debug, Clone, Default)]
pub struct FunctionRegistry {
    functions: HashMap<String, BuiltinFunction>,
}

impl FunctionRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// The shared registry of built-in functions, built on first use
    pub fn builtin() -> &'static FunctionRegistry {
        &BUILTINS
    }

    /// A fresh registry holding every built-in function
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        predicates::register(&mut registry);
        math::register(&mut registry);
        string::register(&mut registry);
        aggregate::register(&mut registry);
        format::register(&mut registry);
        registry
    }

    /// Register a function, replacing any with the same name
    pub fn register(&mut self, name: &str, function: BuiltinFunction) {
        self.functions.insert(name.to_lowercase(), function);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(&name.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Call a function by name. Unknown names log a warning and yield absent.
    pub fn call(&self, name: &str, args: &[Value], context: &mut FunctionContext) -> Result<Value> {
        match self.functions.get(&name.to_lowercase()) {
            Some(function) => function(args, context),
            None => {
                tracing::warn!("Unknown function: {}", name);
                Ok(Value::Absent)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_names() {
        let registry = FunctionRegistry::builtin();
        for name in [
            "is_empty", "is_numeric", "is_null", "is_nan", "is_int", "is_float", "is_string",
            "intval", "floatval", "abs", "ceil", "floor", "round", "min", "max", "pow", "sqrt",
            "exp", "log", "log10", "sin", "cos", "tan", "asin", "acos", "atan", "atan2", "pi",
            "rand", "strlen", "substr", "trim", "ltrim", "rtrim", "strtoupper", "strtolower",
            "ucwords", "str_replace", "strrev", "implode", "join", "count", "sum", "avg",
            "countif", "sumif", "if", "iif", "number_format", "regexmatch",
        ] {
            assert!(registry.contains(name), "missing built-in {}", name);
        }
        assert!(registry.contains("regexMatch"));
        assert_eq!(registry.len(), 50);
    }

    #[test]
    fn test_unknown_function_is_absent() {
        let mut context = FunctionContext::seeded(1);
        let result = FunctionRegistry::builtin().call("no_such_fn", &[Value::from(1)], &mut context);
        assert_eq!(result, Ok(Value::Absent));
    }

    #[test]
    fn test_register_custom_function() {
        fn answer(_: &[Value], _: &mut FunctionContext) -> Result<Value> {
            Ok(Value::from(42))
        }

        let mut registry = FunctionRegistry::with_builtins();
        registry.register("Answer", answer);
        let mut context = FunctionContext::seeded(1);
        assert_eq!(registry.call("ANSWER", &[], &mut context), Ok(Value::from(42)));
        assert!(!FunctionRegistry::builtin().contains("answer"));
    }
}

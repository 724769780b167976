//! Tree-walking evaluator
//!
//! Evaluates a parsed expression against a response state. One tree serves
//! both the boolean relevance check and the raw-value piping path.

use crate::context::FunctionContext;
use crate::error::{Result, RuntimeError};
use crate::functions::FunctionRegistry;
use crate::operators::{execute_binary_op, execute_compare, execute_unary_op};
use crate::resolver::VariableResolver;
use qlogic_core::ast::{Expression, Operator};
use qlogic_core::{ResponseState, Value};

/// Default recursion budget for one evaluation
pub const DEFAULT_EVALUATION_DEPTH: usize = 256;

/// Expression evaluator bound to one response state
pub struct Evaluator<'a> {
    resolver: VariableResolver<'a>,
    functions: &'a FunctionRegistry,
    context: FunctionContext,
    max_depth: usize,
    depth: usize,
}

impl<'a> Evaluator<'a> {
    /// Evaluator over `state` using the built-in functions
    pub fn new(state: &'a ResponseState) -> Self {
        Self {
            resolver: VariableResolver::new(state),
            functions: FunctionRegistry::builtin(),
            context: FunctionContext::new(),
            max_depth: DEFAULT_EVALUATION_DEPTH,
            depth: 0,
        }
    }

    pub fn with_functions(mut self, functions: &'a FunctionRegistry) -> Self {
        self.functions = functions;
        self
    }

    pub fn with_context(mut self, context: FunctionContext) -> Self {
        self.context = context;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Evaluate to a raw value
    pub fn evaluate(&mut self, expr: &Expression) -> Result<Value> {
        self.depth = 0;
        self.eval(expr)
    }

    /// Evaluate and coerce the result to a boolean
    pub fn evaluate_bool(&mut self, expr: &Expression) -> Result<bool> {
        Ok(self.evaluate(expr)?.to_bool())
    }

    fn eval(&mut self, expr: &Expression) -> Result<Value> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(RuntimeError::NestingTooDeep {
                limit: self.max_depth,
            });
        }
        let value = self.eval_node(expr);
        self.depth -= 1;
        value
    }

    fn eval_node(&mut self, expr: &Expression) -> Result<Value> {
        match expr {
            Expression::Literal(value) => Ok(value.clone()),

            Expression::Variable(name) => Ok(self.resolver.resolve_reference(name)),

            Expression::Binary { left, op, right } => match op {
                Operator::And => {
                    let result = self.eval(left)?.to_bool() && self.eval(right)?.to_bool();
                    Ok(Value::Bool(result))
                }
                Operator::Or => {
                    let result = self.eval(left)?.to_bool() || self.eval(right)?.to_bool();
                    Ok(Value::Bool(result))
                }
                op => {
                    let l = self.eval(left)?;
                    let r = self.eval(right)?;
                    if op.is_comparison() {
                        Ok(Value::Bool(execute_compare(&l, *op, &r)))
                    } else {
                        Ok(execute_binary_op(&l, *op, &r))
                    }
                }
            },

            Expression::Unary { op, operand } => {
                let value = self.eval(operand)?;
                Ok(execute_unary_op(value, *op))
            }

            Expression::FunctionCall { name, args } => {
                let values = args
                    .iter()
                    .map(|arg| self.eval(arg))
                    .collect::<Result<Vec<_>>>()?;
                self.functions.call(name, &values, &mut self.context)
            }
        }
    }
}

//! ExpressionEngine - the public evaluation surface
//!
//! The engine owns a copy of the respondent's answers and evaluates
//! relevance conditions, screenout conditions and piping templates against
//! it. The public entry points never fail: a condition that cannot be
//! evaluated is `false`, a value that cannot be computed is absent, and a
//! piping span that cannot be resolved is left as written.

use crate::builder::ExpressionEngineBuilder;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::piping;
use qlogic_core::ast::Expression;
use qlogic_core::{ResponseState, Value};
use qlogic_parser::ExpressionParser;
use qlogic_runtime::{Evaluator, FunctionContext, VariableResolver};

/// Survey logic interpreter bound to one respondent's response state
#[derive(Debug, Clone)]
pub struct ExpressionEngine {
    state: ResponseState,
    config: EngineConfig,
    parser: ExpressionParser,
}

impl Default for ExpressionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpressionEngine {
    /// Engine with an empty state and default configuration
    pub fn new() -> Self {
        Self::from_parts(ResponseState::new(), EngineConfig::default())
    }

    /// Engine over an existing response state
    pub fn with_state(state: ResponseState) -> Self {
        Self::from_parts(state, EngineConfig::default())
    }

    /// Start building an engine
    pub fn builder() -> ExpressionEngineBuilder {
        ExpressionEngineBuilder::new()
    }

    pub(crate) fn from_parts(state: ResponseState, config: EngineConfig) -> Self {
        let parser = ExpressionParser::new().with_max_depth(config.max_nesting_depth);
        Self {
            state,
            config,
            parser,
        }
    }

    /// Evaluate a relevance or screenout condition.
    ///
    /// Empty, whitespace-only and `"1"` conditions are true and `"0"` is
    /// false, without parsing. Any failure is logged and reads as false.
    pub fn evaluate(&self, expression: &str) -> bool {
        if expression.trim().is_empty() || expression == "1" {
            return true;
        }
        if expression == "0" {
            return false;
        }

        match self.try_evaluate(expression) {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(expression, error = %e, "Expression evaluation failed, returning false");
                false
            }
        }
    }

    /// Evaluate a condition, reporting failures
    pub fn try_evaluate(&self, expression: &str) -> Result<bool> {
        let mut condition = expression.trim();
        if self.config.strip_outer_braces {
            condition = condition.strip_prefix('{').unwrap_or(condition);
            condition = condition.strip_suffix('}').unwrap_or(condition).trim();
        }

        let expr = self.parser.parse(condition)?;
        let result = self.evaluator().evaluate_bool(&expr)?;

        if self.config.trace_evaluations {
            tracing::debug!(expression, result, "Evaluated condition");
        }
        Ok(result)
    }

    /// Evaluate a piped value; absent on failure.
    ///
    /// Value expressions are arithmetic: a top-level comparison or `AND`/`OR`
    /// ends the value, so `Q2 > 3` yields `Q2`. Wrap it in parentheses to get
    /// the boolean.
    pub fn evaluate_value(&self, expression: &str) -> Value {
        match self.try_evaluate_value(expression) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(expression, error = %e, "Expression evaluation failed, returning absent");
                Value::Absent
            }
        }
    }

    /// Evaluate an expression to its value, reporting failures
    pub fn try_evaluate_value(&self, expression: &str) -> Result<Value> {
        let expr = self.parser.parse_value(expression.trim())?;
        let value = self.evaluator().evaluate(&expr)?;

        if self.config.trace_evaluations {
            tracing::debug!(expression, value = ?value, "Evaluated value");
        }
        Ok(value)
    }

    /// Substitute `{...}` spans in display text. See [`piping`].
    pub fn pipe(&self, template: &str) -> String {
        piping::pipe(self, template)
    }

    /// Parse an expression strictly, as an authoring tool would.
    ///
    /// Returns the syntax tree, or the first syntax error.
    pub fn validate(&self, expression: &str) -> Result<Expression> {
        let parser = ExpressionParser::strict().with_max_depth(self.config.max_nesting_depth);
        Ok(parser.parse(expression)?)
    }

    /// Record an answer
    pub fn set_value(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.state.insert(key, value);
    }

    /// Look up an answer by reference, with suffix and naming-convention
    /// handling
    pub fn get_value(&self, key: &str) -> Value {
        VariableResolver::new(&self.state).lookup(key)
    }

    /// Swap in a new response state, returning the previous one
    pub fn replace_state(&mut self, state: ResponseState) -> ResponseState {
        std::mem::replace(&mut self.state, state)
    }

    /// Forget every recorded answer
    pub fn clear_state(&mut self) {
        self.state.clear();
    }

    pub fn state(&self) -> &ResponseState {
        &self.state
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn evaluator(&self) -> Evaluator<'_> {
        Evaluator::new(&self.state)
            .with_context(FunctionContext::with_seed(self.config.rand_seed))
            .with_max_depth(self.config.evaluation_depth())
    }
}

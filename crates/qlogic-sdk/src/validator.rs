//! Expression Validation Module
//!
//! Authoring-time checks for survey logic. The runtime parser accepts any
//! input; this validator parses strictly and reports what the runtime would
//! silently recover from, plus references it cannot resolve.
//!
//! # Example
//!
//! ```rust
//! use qlogic_sdk::ExpressionValidator;
//!
//! let result = ExpressionValidator::new()
//!     .with_known_variables(["Q1", "Q2"])
//!     .validate("Q1 == 'A1' AND Q3 > 2");
//!
//! assert!(result.valid);
//! assert_eq!(result.warnings[0].code, "W002");
//! ```

use qlogic_core::ast::Expression;
use qlogic_parser::{ExpressionParser, ParseError, DEFAULT_MAX_DEPTH};
use qlogic_runtime::resolver::candidate_keys;
use qlogic_runtime::FunctionRegistry;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Severity level for validation diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Error,
    Warning,
}

/// A single diagnostic message from validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Severity level
    pub severity: DiagnosticSeverity,

    /// Error/warning code (e.g., "E001", "W001")
    pub code: String,

    /// Human-readable message
    pub message: String,

    /// The expression or reference the diagnostic is about
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl Diagnostic {
    /// Create a new error diagnostic
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: DiagnosticSeverity::Error,
            code: code.into(),
            message: message.into(),
            context: None,
        }
    }

    /// Create a new warning diagnostic
    pub fn warning(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: DiagnosticSeverity::Warning,
            code: code.into(),
            message: message.into(),
            context: None,
        }
    }

    /// Add context snippet
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

/// Result of expression validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Whether the expression is valid (no errors)
    pub valid: bool,

    /// List of errors (severity = Error)
    pub errors: Vec<Diagnostic>,

    /// List of warnings (severity = Warning)
    pub warnings: Vec<Diagnostic>,
}

impl ValidationResult {
    fn success(warnings: Vec<Diagnostic>) -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings,
        }
    }

    fn failure(error: Diagnostic) -> Self {
        Self {
            valid: false,
            errors: vec![error],
            warnings: Vec::new(),
        }
    }
}

/// Validator for relevance, screenout and piping expressions
#[derive(Debug, Clone)]
pub struct ExpressionValidator {
    known_variables: Option<HashSet<String>>,
    max_depth: usize,
}

impl Default for ExpressionValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpressionValidator {
    /// Create a validator that checks syntax and function names
    pub fn new() -> Self {
        Self {
            known_variables: None,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Also warn about references to variables outside this set
    pub fn with_known_variables<I, S>(mut self, variables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.known_variables = Some(variables.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Validate one expression. A single pair of enclosing braces is allowed.
    pub fn validate(&self, expression: &str) -> ValidationResult {
        let trimmed = expression.trim();
        let inner = trimmed
            .strip_prefix('{')
            .and_then(|s| s.strip_suffix('}'))
            .unwrap_or(trimmed);

        let parser = ExpressionParser::strict().with_max_depth(self.max_depth);
        match parser.parse(inner) {
            Ok(expr) => ValidationResult::success(self.check_references(&expr)),
            Err(e) => {
                let code = match e {
                    ParseError::NestingTooDeep { .. } => "E002",
                    _ => "E001",
                };
                ValidationResult::failure(Diagnostic::error(code, e.to_string()).with_context(inner))
            }
        }
    }

    fn check_references(&self, expr: &Expression) -> Vec<Diagnostic> {
        let functions = FunctionRegistry::builtin();
        let mut warnings = Vec::new();
        let mut seen = HashSet::new();

        for name in expr.function_names() {
            if !functions.contains(name) && seen.insert(format!("fn:{}", name)) {
                warnings.push(
                    Diagnostic::warning("W001", format!("Unknown function '{}' evaluates to absent", name))
                        .with_context(name),
                );
            }
        }

        if let Some(known) = &self.known_variables {
            for name in expr.variables() {
                let resolvable = candidate_keys(name).iter().any(|key| known.contains(key));
                if !resolvable && seen.insert(format!("var:{}", name)) {
                    warnings.push(
                        Diagnostic::warning("W002", format!("Variable '{}' is not defined in this survey", name))
                            .with_context(name),
                    );
                }
            }
        }

        warnings
    }
}

/// Validate an expression with default options
pub fn validate(expression: &str) -> ValidationResult {
    ExpressionValidator::new().validate(expression)
}

//! Expression AST nodes

use super::operator::Operator;
use crate::types::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Expression AST node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    /// Literal value (`'A1'`, `5`, `true`, `null`)
    Literal(Value),

    /// Variable reference as written, suffix included (`Q1_SQ006.NAOK`)
    Variable(String),

    /// Binary operation
    Binary {
        left: Box<Expression>,
        op: Operator,
        right: Box<Expression>,
    },

    /// Unary operation
    Unary {
        op: UnaryOperator,
        operand: Box<Expression>,
    },

    /// Built-in function call; `name` is lowercased
    FunctionCall { name: String, args: Vec<Expression> },
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOperator {
    /// Logical NOT (NOT, !)
    Not,
    /// Arithmetic negation (-)
    Negate,
    /// Unary plus (+), returns its operand unchanged
    Plus,
}

impl Expression {
    /// Create a literal expression
    pub fn literal(value: impl Into<Value>) -> Self {
        Expression::Literal(value.into())
    }

    /// Create a variable reference
    pub fn variable(name: impl Into<String>) -> Self {
        Expression::Variable(name.into())
    }

    /// Create a binary expression
    pub fn binary(left: Expression, op: Operator, right: Expression) -> Self {
        Expression::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// Create a unary expression
    pub fn unary(op: UnaryOperator, operand: Expression) -> Self {
        Expression::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    /// Create a function call expression
    pub fn function_call(name: impl Into<String>, args: Vec<Expression>) -> Self {
        Expression::FunctionCall {
            name: name.into(),
            args,
        }
    }

    /// Visit this node and all descendants, parents first
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Expression)) {
        visit(self);
        match self {
            Expression::Literal(_) | Expression::Variable(_) => {}
            Expression::Binary { left, right, .. } => {
                left.walk(visit);
                right.walk(visit);
            }
            Expression::Unary { operand, .. } => operand.walk(visit),
            Expression::FunctionCall { args, .. } => {
                for arg in args {
                    arg.walk(visit);
                }
            }
        }
    }

    /// Names of all variables referenced by this expression
    pub fn variables(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.walk(&mut |node| {
            if let Expression::Variable(name) = node {
                names.push(name.as_str());
            }
        });
        names
    }

    /// Names of all functions called by this expression
    pub fn function_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.walk(&mut |node| {
            if let Expression::FunctionCall { name, .. } = node {
                names.push(name.as_str());
            }
        });
        names
    }
}

/// Renders a fully parenthesized form, used in diagnostics
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Literal(Value::String(s)) => write!(f, "'{}'", s.replace('\'', "\\'")),
            Expression::Literal(Value::Absent) => f.write_str("null"),
            Expression::Literal(value @ Value::List(_)) => write!(f, "[{}]", value),
            Expression::Literal(value) => write!(f, "{}", value),
            Expression::Variable(name) => f.write_str(name),
            Expression::Binary { left, op, right } => write!(f, "({} {} {})", left, op, right),
            Expression::Unary { op, operand } => match op {
                UnaryOperator::Not => write!(f, "NOT {}", operand),
                UnaryOperator::Negate => write!(f, "-{}", operand),
                UnaryOperator::Plus => write!(f, "+{}", operand),
            },
            Expression::FunctionCall { name, args } => {
                write!(f, "{}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_str(")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_expression() {
        // Q1 == 'A2'
        let expr = Expression::binary(
            Expression::variable("Q1"),
            Operator::Eq,
            Expression::literal("A2"),
        );

        match expr {
            Expression::Binary { left, op, right } => {
                assert_eq!(op, Operator::Eq);
                assert_eq!(*left, Expression::Variable("Q1".to_string()));
                assert_eq!(*right, Expression::Literal(Value::String("A2".to_string())));
            }
            _ => panic!("Expected Binary expression"),
        }
    }

    #[test]
    fn test_collect_variables_and_functions() {
        // sum(Q1, Q2.NAOK) > 3 AND NOT is_empty(Q3)
        let expr = Expression::binary(
            Expression::binary(
                Expression::function_call(
                    "sum",
                    vec![Expression::variable("Q1"), Expression::variable("Q2.NAOK")],
                ),
                Operator::Gt,
                Expression::literal(3.0),
            ),
            Operator::And,
            Expression::unary(
                UnaryOperator::Not,
                Expression::function_call("is_empty", vec![Expression::variable("Q3")]),
            ),
        );

        assert_eq!(expr.variables(), vec!["Q1", "Q2.NAOK", "Q3"]);
        assert_eq!(expr.function_names(), vec!["sum", "is_empty"]);
    }

    #[test]
    fn test_display() {
        let expr = Expression::binary(
            Expression::unary(UnaryOperator::Negate, Expression::literal(2.0)),
            Operator::Add,
            Expression::function_call(
                "strlen",
                vec![Expression::literal("it's"), Expression::literal(Value::Absent)],
            ),
        );

        assert_eq!(expr.to_string(), r"(-2 + strlen('it\'s', null))");
    }
}

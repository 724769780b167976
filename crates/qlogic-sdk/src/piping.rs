//! Piping - substituting answers and computed values into display text
//!
//! Every `{...}` span in a template is replaced independently. A span whose
//! content contains parentheses, an arithmetic operator or a comparison is
//! evaluated as an expression (`{Q1 + 10}`, `{rand(1,6)}`); anything else is
//! a variable reference (`{Q1}`, `{Q2_SQ001.SelectedValue}`). A span that
//! resolves to nothing, or fails, is left exactly as written.

use crate::engine::ExpressionEngine;
use regex::{Captures, Regex};
use std::sync::LazyLock;

static SPAN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{([^}]+)\}").expect("span pattern is valid")
});

static EXPRESSION_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[()+\-*/%]|==|!=|<=|>=|<|>").expect("expression marker pattern is valid")
});

/// Whether span content should be evaluated rather than looked up
pub fn is_expression(content: &str) -> bool {
    EXPRESSION_MARKER.is_match(content)
}

pub(crate) fn pipe(engine: &ExpressionEngine, template: &str) -> String {
    if template.is_empty() {
        return String::new();
    }

    SPAN.replace_all(template, |caps: &Captures| {
        let original = &caps[0];
        let content = caps[1].trim();

        let value = if is_expression(content) {
            match engine.try_evaluate_value(content) {
                Ok(value) => value,
                Err(e) => {
                    tracing::warn!(content, error = %e, "Piping expression failed, keeping span");
                    return original.to_string();
                }
            }
        } else {
            engine.get_value(content)
        };

        if value.is_absent() {
            original.to_string()
        } else {
            value.to_string()
        }
    })
    .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_expression() {
        assert!(is_expression("Q1 + 10"));
        assert!(is_expression("rand(1,2)"));
        assert!(is_expression("Q1>3"));
        assert!(is_expression("a-b"));
        assert!(!is_expression("Q1"));
        assert!(!is_expression("Q1_SQ001.SelectedValue"));
        assert!(!is_expression("first name"));
    }

    #[test]
    fn test_pipe_variables_and_expressions() {
        let mut engine = ExpressionEngine::new();
        engine.set_value("NAME", "Bob");
        engine.set_value("Q2", 5);

        assert_eq!(engine.pipe("Hello {NAME}!"), "Hello Bob!");
        assert_eq!(engine.pipe("{ NAME }"), "Bob");
        assert_eq!(engine.pipe("Total: {Q2 * 2}"), "Total: 10");
        assert_eq!(engine.pipe("{Q2 > 3}"), "5");
        assert_eq!(engine.pipe("{Q2 == 5 AND Q2}"), "5");
        assert_eq!(engine.pipe("{(Q2 > 3)}"), "true");
    }

    #[test]
    fn test_unresolved_spans_are_kept() {
        let engine = ExpressionEngine::new();
        assert_eq!(engine.pipe("Hi {NAME}, {missing(1)}"), "Hi {NAME}, {missing(1)}");
        assert_eq!(engine.pipe("{number_format(1, 200)}"), "{number_format(1, 200)}");
        assert_eq!(engine.pipe("{}"), "{}");
        assert_eq!(engine.pipe(""), "");
        assert_eq!(engine.pipe("no spans"), "no spans");
    }
}

//! Common test utilities for SDK integration tests

#![allow(dead_code)]

use qlogic_sdk::{ExpressionEngine, ExpressionEngineBuilder, Value};
use std::sync::Once;

static TRACING: Once = Once::new();

/// Install a test subscriber once; filter with `RUST_LOG`
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Test helper that collects answers and builds an engine over them
pub struct TestSurvey {
    builder: ExpressionEngineBuilder,
}

impl TestSurvey {
    /// Create an empty survey with a fixed `rand()` seed
    pub fn new() -> Self {
        init_tracing();
        Self {
            builder: ExpressionEngineBuilder::new().rand_seed(1234),
        }
    }

    /// Record an answer
    pub fn answer(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.builder = self.builder.set_value(key, value);
        self
    }

    pub fn engine(self) -> ExpressionEngine {
        self.builder.build().expect("Failed to build engine")
    }
}

/// Helper to create a response state from key-value pairs
#[macro_export]
macro_rules! answers {
    ($($key:expr => $value:expr),* $(,)?) => {{
        let mut state = qlogic_sdk::ResponseState::new();
        $(
            state.insert($key, $value);
        )*
        state
    }};
}

/// Assertion helpers for condition results
pub trait ConditionAssertions {
    fn assert_shown(&self, expression: &str);
    fn assert_hidden(&self, expression: &str);
}

impl ConditionAssertions for ExpressionEngine {
    fn assert_shown(&self, expression: &str) {
        assert!(self.evaluate(expression), "Expected '{}' to be true", expression);
    }

    fn assert_hidden(&self, expression: &str) {
        assert!(!self.evaluate(expression), "Expected '{}' to be false", expression);
    }
}

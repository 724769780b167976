//! Builder pattern for ExpressionEngine

use crate::config::EngineConfig;
use crate::engine::ExpressionEngine;
use crate::error::Result;
use qlogic_core::{ResponseState, Value};

/// Builder for ExpressionEngine
///
/// # Example
///
/// ```rust
/// use qlogic_sdk::ExpressionEngineBuilder;
///
/// let engine = ExpressionEngineBuilder::new()
///     .set_value("Q1", "A2")
///     .rand_seed(42)
///     .build()
///     .unwrap();
///
/// assert!(engine.evaluate("Q1 == 'A2'"));
/// ```
#[derive(Debug, Default)]
pub struct ExpressionEngineBuilder {
    config: EngineConfig,
    state: ResponseState,
}

impl ExpressionEngineBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Start from an existing response state
    pub fn with_state(mut self, state: ResponseState) -> Self {
        self.state = state;
        self
    }

    /// Record one answer
    pub fn set_value(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.state.insert(key, value);
        self
    }

    /// Pin `rand()` to a seed
    pub fn rand_seed(mut self, seed: u64) -> Self {
        self.config.rand_seed = Some(seed);
        self
    }

    pub fn max_nesting_depth(mut self, depth: usize) -> Self {
        self.config.max_nesting_depth = depth;
        self
    }

    pub fn trace_evaluations(mut self, enable: bool) -> Self {
        self.config.trace_evaluations = enable;
        self
    }

    /// Build the engine, validating the configuration
    pub fn build(self) -> Result<ExpressionEngine> {
        self.config.validate()?;
        tracing::debug!(
            answers = self.state.len(),
            max_nesting_depth = self.config.max_nesting_depth,
            "Building expression engine"
        );
        Ok(ExpressionEngine::from_parts(self.state, self.config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SdkError;

    #[test]
    fn test_build_with_values() {
        let engine = ExpressionEngineBuilder::new()
            .set_value("Q1", "A1")
            .set_value("Q2", 3)
            .build()
            .unwrap();
        assert_eq!(engine.state().len(), 2);
        assert!(engine.evaluate("Q1 == 'A1' AND Q2 == 3"));
    }

    #[test]
    fn test_build_rejects_invalid_config() {
        let result = ExpressionEngineBuilder::new().max_nesting_depth(0).build();
        assert!(matches!(result, Err(SdkError::ConfigError(_))));
    }

    #[test]
    fn test_seeded_rand_is_stable() {
        let engine = ExpressionEngineBuilder::new().rand_seed(99).build().unwrap();
        let first = engine.evaluate_value("rand(1, 100)");
        assert_eq!(engine.evaluate_value("rand(1, 100)"), first);
        assert_eq!(engine.config().rand_seed, Some(99));
    }
}

//! Configuration types for ExpressionEngine

use crate::error::{Result, SdkError};
use qlogic_parser::DEFAULT_MAX_DEPTH;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Evaluation depth granted per unit of parse nesting. The parser bounds the
/// tree depth; the evaluator keeps its own guard with some headroom.
const EVALUATION_DEPTH_FACTOR: usize = 2;

/// Main engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Limit for nested groups, calls, prefix operators and operator chains
    pub max_nesting_depth: usize,

    /// Fixed seed for `rand()`, reapplied on every evaluation
    pub rand_seed: Option<u64>,

    /// Log every evaluation at debug level
    pub trace_evaluations: bool,

    /// Strip one enclosing `{`/`}` pair before evaluating a condition
    pub strip_outer_braces: bool,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            max_nesting_depth: DEFAULT_MAX_DEPTH,
            rand_seed: None,
            trace_evaluations: false,
            strip_outer_braces: true,
        }
    }

    /// Set the nesting limit
    pub fn with_max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = depth;
        self
    }

    /// Pin `rand()` to a seed
    pub fn with_rand_seed(mut self, seed: u64) -> Self {
        self.rand_seed = Some(seed);
        self
    }

    /// Enable evaluation tracing
    pub fn with_trace_evaluations(mut self, enable: bool) -> Self {
        self.trace_evaluations = enable;
        self
    }

    pub fn with_strip_outer_braces(mut self, enable: bool) -> Self {
        self.strip_outer_braces = enable;
        self
    }

    /// Load from a YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: EngineConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file; `.json` files are read as JSON, anything else as YAML
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        tracing::debug!("Loading engine configuration from {}", path.display());

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        }
    }

    /// Check the configuration for values the engine cannot use
    pub fn validate(&self) -> Result<()> {
        if self.max_nesting_depth == 0 {
            return Err(SdkError::ConfigError(
                "max_nesting_depth must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Recursion budget for the evaluator
    pub fn evaluation_depth(&self) -> usize {
        self.max_nesting_depth.saturating_mul(EVALUATION_DEPTH_FACTOR)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.max_nesting_depth, 128);
        assert_eq!(config.rand_seed, None);
        assert!(!config.trace_evaluations);
        assert!(config.strip_outer_braces);
        assert_eq!(config.evaluation_depth(), 256);
    }

    #[test]
    fn test_from_yaml_fills_missing_fields() {
        let config = EngineConfig::from_yaml_str("rand_seed: 42\ntrace_evaluations: true\n").unwrap();
        assert_eq!(config.rand_seed, Some(42));
        assert!(config.trace_evaluations);
        assert_eq!(config.max_nesting_depth, 128);
    }

    #[test]
    fn test_from_json() {
        let config = EngineConfig::from_json_str(r#"{"max_nesting_depth": 8, "strip_outer_braces": false}"#)
            .unwrap();
        assert_eq!(config.max_nesting_depth, 8);
        assert!(!config.strip_outer_braces);
    }

    #[test]
    fn test_rejects_zero_depth() {
        let result = EngineConfig::from_yaml_str("max_nesting_depth: 0");
        assert!(matches!(result, Err(SdkError::ConfigError(_))));
    }

    #[test]
    fn test_builder_methods() {
        let config = EngineConfig::new()
            .with_max_nesting_depth(10)
            .with_rand_seed(7)
            .with_trace_evaluations(true)
            .with_strip_outer_braces(false);
        assert_eq!(config.max_nesting_depth, 10);
        assert_eq!(config.rand_seed, Some(7));
        assert!(config.trace_evaluations);
        assert!(!config.strip_outer_braces);
    }
}

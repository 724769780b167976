//! Response state
//!
//! The answers collected so far in one respondent session, keyed by variable
//! key (`Q1`, `Q1_SQ006`, `Q1.SQ006`). The caller owns it; the interpreter only
//! reads it.

use super::value::Value;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::hash_map;
use std::collections::HashMap;

/// Mapping from variable key to recorded value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseState {
    values: HashMap<String, Value>,
}

impl ResponseState {
    /// Create an empty response state
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a response state from a JSON object (`{"Q1": "A2", "Q2": 5}`)
    pub fn from_json_str(json: &str) -> Result<Self> {
        let state: ResponseState = serde_json::from_str(json)?;
        log::debug!("Loaded response state with {} values", state.len());
        Ok(state)
    }

    /// Record a value, returning the previous one for that key
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(key.into(), value.into())
    }

    /// Exact-key lookup (no suffix or naming-convention handling)
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> hash_map::Iter<'_, String, Value> {
        self.values.iter()
    }
}

impl From<HashMap<String, Value>> for ResponseState {
    fn from(values: HashMap<String, Value>) -> Self {
        Self { values }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for ResponseState {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for ResponseState {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.values
            .extend(iter.into_iter().map(|(key, value)| (key.into(), value.into())));
    }
}

impl<'a> IntoIterator for &'a ResponseState {
    type Item = (&'a String, &'a Value);
    type IntoIter = hash_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

//! Variable Resolution
//!
//! Maps a variable reference as written in an expression to a value in the
//! response state.
//!
//! Two conventions for matrix sub-items coexist in stored surveys
//! (`Q1_SQ006` and `Q1.SQ006`), and references may carry a display suffix
//! (`.NAOK`, `.SelectedValue`, `.ChosenValue`). Lookup strips the suffix, then
//! probes the exact key, the key with underscores as dots, and the key with
//! dots as underscores, returning the first key present.

use qlogic_core::ast::is_keyword;
use qlogic_core::{ResponseState, Value};

/// Suffixes stripped before lookup (matched case-insensitively)
pub const SUFFIXES: [&str; 3] = ["NAOK", "SelectedValue", "ChosenValue"];

/// Split a reference into its lookup name and recognized suffix.
///
/// # Examples
///
/// `Q1_SQ006.NAOK` gives `("Q1_SQ006", Some("NAOK"))`; `Q1.SQ006` has no
/// recognized suffix and is returned whole.
pub fn strip_suffix(name: &str) -> (&str, Option<&str>) {
    if let Some((base, suffix)) = name.rsplit_once('.') {
        if SUFFIXES.iter().any(|s| s.eq_ignore_ascii_case(suffix)) {
            return (base, Some(suffix));
        }
    }
    (name, None)
}

/// Keys probed for a reference, in order, without duplicates
pub fn candidate_keys(name: &str) -> Vec<String> {
    let (base, _) = strip_suffix(name);
    let mut keys = vec![base.to_string()];
    for key in [base.replace('_', "."), base.replace('.', "_")] {
        if !keys.contains(&key) {
            keys.push(key);
        }
    }
    keys
}

/// Resolves variable references against a response state
#[derive(Debug, Clone, Copy)]
pub struct VariableResolver<'a> {
    state: &'a ResponseState,
}

impl<'a> VariableResolver<'a> {
    pub fn new(state: &'a ResponseState) -> Self {
        Self { state }
    }

    /// Look up a reference, absent if no probed key is present.
    ///
    /// A key stored with an absent value ends the probe.
    pub fn lookup(&self, name: &str) -> Value {
        for key in candidate_keys(name) {
            if let Some(value) = self.state.get(&key) {
                return value.clone();
            }
        }
        tracing::trace!("Variable not found: {}", name);
        Value::Absent
    }

    /// Resolve a variable reference inside an expression.
    ///
    /// Keywords never resolve. An absent `.NAOK` reference is `false`.
    pub fn resolve_reference(&self, name: &str) -> Value {
        if is_keyword(name) {
            return Value::Absent;
        }

        let value = self.lookup(name);
        if value.is_absent() {
            if let (_, Some(suffix)) = strip_suffix(name) {
                if suffix.eq_ignore_ascii_case("NAOK") {
                    return Value::Bool(false);
                }
            }
        }
        value
    }
}

//! Variable resolution engine
//!
//! Resolves variables whose values reference other variables by repeated
//! passes over the unresolved set until nothing changes. Forward references
//! work in any declaration order, and cycles end in a sentinel value
//! instead of looping.

use indexmap::IndexMap;

use blockmark_domain::Variable;
use blockmark_domain::sentinel::{CIRCULAR_REFERENCE, unknown_reference};

use super::parser::parse_references;
use crate::expression::evaluate;

/// Result of resolving a set of variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionResult {
    /// Final value of every non-blank key, in the order keys were resolved.
    pub values: IndexMap<String, String>,

    /// Keys that could not be completed and hold the circular sentinel.
    pub unresolvable: Vec<String>,

    /// Number of resolution passes that ran.
    pub passes: usize,
}

impl ResolutionResult {
    /// Returns the resolved value for a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Whether every variable resolved to a concrete value.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.unresolvable.is_empty()
    }

    /// Returns the count of resolved keys, sentinel values included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if there were no variables to resolve.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over `(key, value)` pairs in resolution order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// The variable resolution engine.
///
/// Built fresh from a snapshot of variables for every render and consumed
/// by [`VariableResolver::resolve`]; no state survives between runs.
#[derive(Debug, Clone)]
pub struct VariableResolver {
    /// Key to raw value, for keys not yet resolved. Insertion ordered.
    unresolved: IndexMap<String, String>,
    /// Key to final value.
    resolved: IndexMap<String, String>,
    /// Upper bound on resolution passes.
    budget: usize,
}

impl VariableResolver {
    /// Creates a resolver over the given variables.
    ///
    /// Keys are trimmed and blank keys are skipped. When a key repeats, the
    /// last value wins but the key keeps its first position.
    pub fn new<'a>(variables: impl IntoIterator<Item = &'a Variable>) -> Self {
        let mut unresolved = IndexMap::new();
        for variable in variables {
            if let Some(key) = variable.resolution_key() {
                unresolved.insert(key.to_string(), variable.value.clone());
            }
        }

        let budget = unresolved.len() + 1;
        Self {
            unresolved,
            resolved: IndexMap::new(),
            budget,
        }
    }

    /// Returns the maximum number of passes this resolver will run.
    #[must_use]
    pub const fn budget(&self) -> usize {
        self.budget
    }

    /// Runs resolution to completion.
    ///
    /// Stops when every key is resolved, the pass budget is spent, or a
    /// pass completes nothing. Keys still pending are assigned
    /// `[Circular Ref or Error]`.
    #[must_use]
    pub fn resolve(mut self) -> ResolutionResult {
        let mut passes = 0;

        while !self.unresolved.is_empty() && passes < self.budget {
            passes += 1;
            if !self.run_pass() {
                break;
            }
        }

        let unresolvable: Vec<String> = self.unresolved.keys().cloned().collect();
        for key in &unresolvable {
            tracing::warn!(variable = %key, "circular or unresolvable variable reference");
            self.resolved
                .insert(key.clone(), CIRCULAR_REFERENCE.to_string());
        }

        tracing::debug!(
            passes,
            resolved = self.resolved.len(),
            unresolvable = unresolvable.len(),
            "variable resolution finished"
        );

        ResolutionResult {
            values: self.resolved,
            unresolvable,
            passes,
        }
    }

    /// Attempts every pending key once. Returns whether any key completed.
    fn run_pass(&mut self) -> bool {
        let keys: Vec<String> = self.unresolved.keys().cloned().collect();
        let mut progressed = false;

        for key in keys {
            let Some(raw) = self.unresolved.get(&key) else {
                continue;
            };
            let Some(substituted) = self.substitute_resolved(raw) else {
                continue;
            };

            let value = evaluate(&substituted);
            self.unresolved.shift_remove(&key);
            self.resolved.insert(key, value);
            progressed = true;
        }

        progressed
    }

    /// Replaces every token in `raw` with its resolved value.
    ///
    /// Returns `None` if any token names a key that is still pending.
    /// Tokens naming no variable at all become `[Unknown: <name>]`.
    fn substitute_resolved(&self, raw: &str) -> Option<String> {
        let references = parse_references(raw);
        if references.is_empty() {
            return Some(raw.to_string());
        }

        let mut result = String::with_capacity(raw.len());
        let mut last_end = 0;

        for reference in &references {
            if self.unresolved.contains_key(&reference.name) {
                return None;
            }

            result.push_str(&raw[last_end..reference.span.start]);
            match self.resolved.get(&reference.name) {
                Some(value) => result.push_str(value),
                None => result.push_str(&unknown_reference(&reference.name)),
            }
            last_end = reference.span.end;
        }

        result.push_str(&raw[last_end..]);
        Some(result)
    }
}

/// Resolves a list of variables in one call.
#[must_use]
pub fn resolve_variables(variables: &[Variable]) -> ResolutionResult {
    VariableResolver::new(variables).resolve()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use blockmark_domain::sentinel::INVALID_EXPRESSION;
    use pretty_assertions::assert_eq;

    fn vars(pairs: &[(&str, &str)]) -> Vec<Variable> {
        pairs.iter().map(|(k, v)| Variable::new(*k, *v)).collect()
    }

    #[test]
    fn test_no_dependency() {
        let result = resolve_variables(&vars(&[("price", "10")]));
        assert_eq!(result.get("price"), Some("10"));
        assert!(result.is_complete());
    }

    #[test]
    fn test_long_numeric_value_kept_exactly() {
        let result = resolve_variables(&vars(&[
            ("card", "4111111111111111"),
            ("copy", "{{card}}"),
        ]));
        assert_eq!(result.get("card"), Some("4111111111111111"));
        assert_eq!(result.get("copy"), Some("4111111111111111"));
    }

    #[test]
    fn test_plain_text_value() {
        let result = resolve_variables(&vars(&[("product_name", "Awesome Gadget")]));
        assert_eq!(result.get("product_name"), Some("Awesome Gadget"));
    }

    #[test]
    fn test_arithmetic_over_reference() {
        let result = resolve_variables(&vars(&[("price", "10"), ("tax", "{{price}} * 1.1")]));
        assert_eq!(result.get("tax"), Some("11"));
    }

    #[test]
    fn test_chained_dependencies() {
        let result = resolve_variables(&vars(&[
            ("a", "1"),
            ("b", "{{a}} + 1"),
            ("c", "{{b}} + 1"),
        ]));
        assert_eq!(result.get("a"), Some("1"));
        assert_eq!(result.get("b"), Some("2"));
        assert_eq!(result.get("c"), Some("3"));
    }

    #[test]
    fn test_declaration_order_independent() {
        let forward = resolve_variables(&vars(&[
            ("c", "{{b}} + 1"),
            ("b", "{{a}} + 1"),
            ("a", "1"),
        ]));
        assert_eq!(forward.get("a"), Some("1"));
        assert_eq!(forward.get("b"), Some("2"));
        assert_eq!(forward.get("c"), Some("3"));
        assert!(forward.passes <= 4);
    }

    #[test]
    fn test_direct_cycle() {
        let resolver = VariableResolver::new(&vars(&[("x", "{{y}}"), ("y", "{{x}}")]));
        let budget = resolver.budget();
        let result = resolver.resolve();
        assert_eq!(result.get("x"), Some(CIRCULAR_REFERENCE));
        assert_eq!(result.get("y"), Some(CIRCULAR_REFERENCE));
        assert_eq!(result.unresolvable, vec!["x", "y"]);
        assert!(result.passes <= budget);
        assert_eq!(budget, 3);
    }

    #[test]
    fn test_self_reference() {
        let result = resolve_variables(&vars(&[("me", "{{me}} + 1")]));
        assert_eq!(result.get("me"), Some(CIRCULAR_REFERENCE));
    }

    #[test]
    fn test_cycle_does_not_block_independent_keys() {
        let result = resolve_variables(&vars(&[
            ("x", "{{y}}"),
            ("y", "{{x}}"),
            ("ok", "5"),
            ("depends_on_cycle", "{{x}} and more"),
        ]));
        assert_eq!(result.get("ok"), Some("5"));
        assert_eq!(result.get("depends_on_cycle"), Some(CIRCULAR_REFERENCE));
        assert_eq!(result.unresolvable.len(), 3);
    }

    #[test]
    fn test_unknown_reference_in_value() {
        let result = resolve_variables(&vars(&[("greeting", "Hi {{nobody}}")]));
        assert_eq!(result.get("greeting"), Some("Hi [Unknown: nobody]"));
    }

    #[test]
    fn test_unknown_reference_in_arithmetic_is_text() {
        let result = resolve_variables(&vars(&[("total", "{{missing}} + 1")]));
        assert_eq!(result.get("total"), Some("[Unknown: missing] + 1"));
    }

    #[test]
    fn test_blank_key_is_invisible() {
        let result = resolve_variables(&vars(&[("  ", "5"), ("use", "{{}} / {{ }}")]));
        assert_eq!(result.len(), 1);
        assert_eq!(result.get("use"), Some("[Unknown: ] / [Unknown: ]"));
    }

    #[test]
    fn test_keys_are_trimmed_values_are_not() {
        let result = resolve_variables(&vars(&[(" name ", "  padded  "), ("ref", "<{{ name }}>")]));
        assert_eq!(result.get("name"), Some("  padded  "));
        assert_eq!(result.get("ref"), Some("<  padded  >"));
    }

    #[test]
    fn test_duplicate_keys_last_wins() {
        let result = resolve_variables(&vars(&[("k", "first"), ("other", "x"), ("k", "second")]));
        assert_eq!(result.get("k"), Some("second"));
        let keys: Vec<&str> = result.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["k", "other"]);
    }

    #[test]
    fn test_repeated_reference_replaced_everywhere() {
        let result = resolve_variables(&vars(&[("n", "3"), ("sq", "{{n}} * {{n}}")]));
        assert_eq!(result.get("sq"), Some("9"));
    }

    #[test]
    fn test_invalid_expression_after_substitution() {
        let result = resolve_variables(&vars(&[("a", "2"), ("bad", "{{a}} +")]));
        assert_eq!(result.get("bad"), Some(INVALID_EXPRESSION));
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let input = vars(&[("b", "{{a}} * 2"), ("a", "21"), ("c", "{{c}}")]);
        assert_eq!(resolve_variables(&input), resolve_variables(&input));
    }

    #[test]
    fn test_empty_input() {
        let result = resolve_variables(&[]);
        assert!(result.is_empty());
        assert_eq!(result.passes, 0);
    }
}

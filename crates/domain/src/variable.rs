//! Template variable type

use serde::{Deserialize, Serialize};

use crate::id::generate_id;

/// A named value that can be referenced from content as `{{key}}`.
///
/// The value may itself contain references to other variables and simple
/// arithmetic; both are resolved before substitution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    /// Unique identifier.
    pub id: String,
    /// Name used in reference tokens. Surrounding whitespace is ignored.
    pub key: String,
    /// Raw, unresolved value.
    pub value: String,
}

impl Variable {
    /// Creates a variable with a fresh id.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            key: key.into(),
            value: value.into(),
        }
    }

    /// Returns the trimmed key, or `None` if it is blank.
    ///
    /// Variables with blank keys never take part in resolution.
    #[must_use]
    pub fn resolution_key(&self) -> Option<&str> {
        let key = self.key.trim();
        (!key.is_empty()).then_some(key)
    }
}

impl Default for Variable {
    fn default() -> Self {
        Self::new("", "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_key_trims() {
        assert_eq!(
            Variable::new("  price ", "10").resolution_key(),
            Some("price")
        );
    }

    #[test]
    fn test_blank_key_is_excluded() {
        assert_eq!(Variable::new("   ", "10").resolution_key(), None);
        assert_eq!(Variable::default().resolution_key(), None);
    }
}

//! Reference parser for `{{name}}` syntax
//!
//! Finds reference tokens in variable values and document bodies.
//! A token runs from `{{` to the first following `}}` and never spans a
//! line break. The name between the braces is trimmed; it may be empty.

use std::ops::Range;

/// A reference token found in a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// The referenced name, trimmed.
    pub name: String,

    /// Byte range of the whole token, braces included.
    pub span: Range<usize>,
}

impl Reference {
    /// Creates a new reference, trimming the name.
    #[must_use]
    pub fn new(name: &str, span: Range<usize>) -> Self {
        Self {
            name: name.trim().to_string(),
            span,
        }
    }

    /// Returns the token text as it appears in `input`.
    #[must_use]
    pub fn token<'a>(&self, input: &'a str) -> &'a str {
        &input[self.span.clone()]
    }
}

/// Formats the canonical token for a key, e.g. `{{price}}`.
#[must_use]
pub fn reference_token(key: &str) -> String {
    format!("{{{{{key}}}}}")
}

fn is_line_break(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Parses a string and returns every reference token in order.
///
/// Matching is non-greedy: in `{{a {{b}}` the single token's name is
/// `a {{b`. After a match, scanning resumes right after its closing braces.
///
/// # Examples
///
/// ```
/// use blockmark_application::variable_resolver::parser::parse_references;
///
/// let refs = parse_references("Hello {{ name }}, total {{sum}}");
/// assert_eq!(refs.len(), 2);
/// assert_eq!(refs[0].name, "name");
/// assert_eq!(refs[1].name, "sum");
/// ```
#[must_use]
pub fn parse_references(input: &str) -> Vec<Reference> {
    let mut references = Vec::new();
    let mut pos = 0;

    while let Some(offset) = input[pos..].find("{{") {
        let start = pos + offset;
        let inner_start = start + 2;

        // Without a closing `}}` nothing further can match.
        let Some(close) = input[inner_start..].find("}}") else {
            break;
        };
        let inner = &input[inner_start..inner_start + close];

        if inner.contains(is_line_break) {
            // No token starts here; retry one byte later (`{` is one byte).
            pos = start + 1;
            continue;
        }

        let end = inner_start + close + 2;
        references.push(Reference::new(inner, start..end));
        pos = end;
    }

    references
}

/// Returns true if the input contains at least one reference token.
#[must_use]
pub fn has_references(input: &str) -> bool {
    !parse_references(input).is_empty()
}

/// Extracts the referenced names, in order of appearance.
#[must_use]
pub fn extract_reference_names(input: &str) -> Vec<String> {
    parse_references(input)
        .into_iter()
        .map(|r| r.name)
        .collect()
}

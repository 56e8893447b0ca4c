//! Diagnostic strings that stand in for values the engine cannot compute.
//!
//! These appear verbatim in rendered output so the author can see and fix
//! the problem. They never contain `{{`/`}}`, so substituting them cannot
//! introduce new reference tokens.

/// Result of an arithmetic-looking value that fails to parse or evaluate.
pub const INVALID_EXPRESSION: &str = "[Invalid Expression]";

/// Value assigned to variables caught in a cycle or otherwise never completed.
pub const CIRCULAR_REFERENCE: &str = "[Circular Ref or Error]";

/// Rendered in place of a table block whose content is not valid table JSON.
pub const INVALID_TABLE: &str = "| Error: Invalid Table Data |";

/// Builds the placeholder for a reference to a variable that does not exist.
#[must_use]
pub fn unknown_reference(name: &str) -> String {
    format!("[Unknown: {name}]")
}

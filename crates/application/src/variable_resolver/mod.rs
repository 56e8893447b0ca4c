//! Variable resolution module
//!
//! Provides parsing of `{{name}}` references, fixed-point resolution of
//! variables that refer to each other, and substitution of the results
//! into a document body.
//!
//! # Usage
//!
//! ```
//! use blockmark_application::variable_resolver::{VariableResolver, substitute};
//! use blockmark_domain::Variable;
//!
//! let variables = vec![
//!     Variable::new("tax", "{{price}} * 1.1"),
//!     Variable::new("price", "10"),
//! ];
//!
//! let result = VariableResolver::new(&variables).resolve();
//! assert_eq!(result.get("tax"), Some("11"));
//!
//! let text = substitute("Total: {{tax}}", &result.values);
//! assert_eq!(text, "Total: 11");
//! ```

pub mod engine;
pub mod parser;
pub mod substitution;

pub use engine::{ResolutionResult, VariableResolver, resolve_variables};
pub use parser::{
    Reference, extract_reference_names, has_references, parse_references, reference_token,
};
pub use substitution::{substitute, substitute_with_policy};

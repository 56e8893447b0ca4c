//! Blockmark Application - Resolution engine and use cases
//!
//! This crate holds the templating core:
//! - Sandboxed arithmetic evaluation of variable values
//! - Fixed-point resolution of variables that reference each other
//! - Substitution of resolved values into rendered Markdown
//! - Block rendering, ports and use case orchestration

pub mod error;
pub mod expression;
pub mod ports;
pub mod renderer;
pub mod use_cases;
pub mod variable_resolver;

pub use error::{ApplicationError, ApplicationResult};
pub use expression::evaluate;
pub use ports::{ContentGenerator, DocumentError, DocumentRepository, GenerationError};
pub use renderer::{render_block, render_blocks, table_to_markdown};
pub use use_cases::{
    GenerateBlockContent, GenerateBlockContentOutput, RenderDocument, RenderDocumentOutput,
};
pub use variable_resolver::{ResolutionResult, VariableResolver, resolve_variables, substitute};

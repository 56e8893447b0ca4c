//! Use cases
//!
//! Each use case orchestrates domain types and ports for one user action.

mod generate_block_content;
mod render_document;

pub use generate_block_content::{
    EMPTY_PROMPT_TEXT, GENERATION_FAILED_TEXT, GenerateBlockContent, GenerateBlockContentOutput,
};
pub use render_document::{RenderDocument, RenderDocumentOutput};

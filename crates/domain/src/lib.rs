//! Blockmark Domain - Core document types
//!
//! This crate defines the domain model for the Blockmark templating engine:
//! content blocks, variables, the document that owns them, and user settings.
//! All types here are pure Rust with no I/O dependencies.

pub mod block;
pub mod document;
pub mod error;
pub mod id;
pub mod sentinel;
pub mod settings;
pub mod variable;

pub use block::{BlockKind, ContentBlock, TableData};
pub use document::Document;
pub use error::{DomainError, DomainResult};
pub use id::generate_id;
pub use settings::{GeneratorSettings, RenderSettings, Settings, UnknownTokenPolicy};
pub use variable::Variable;

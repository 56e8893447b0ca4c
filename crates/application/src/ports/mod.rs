//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external systems.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod content_generator;
mod document_repository;

pub use content_generator::{ContentGenerator, GenerationError};
pub use document_repository::{DocumentError, DocumentRepository};

//! Application error types

use blockmark_domain::DomainError;
use thiserror::Error;

use crate::ports::{DocumentError, GenerationError};

/// Application-level errors.
///
/// Rendering never produces these: resolution problems surface as sentinel
/// text in the output. They come from editing, storage and generation.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A domain validation error occurred.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// Loading or saving a document failed.
    #[error("document error: {0}")]
    Document(#[from] DocumentError),

    /// The content generator failed.
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;

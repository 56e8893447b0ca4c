//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur while editing or loading a document.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// No block with the given id exists in the document.
    #[error("block not found: {0}")]
    BlockNotFound(String),

    /// No variable with the given id exists in the document.
    #[error("variable not found: {0}")]
    VariableNotFound(String),

    /// A table block's content is not valid table JSON.
    #[error("invalid table data: {0}")]
    InvalidTableData(String),

    /// A block index is outside the document.
    #[error("block index {index} out of range (document has {len} blocks)")]
    BlockIndexOutOfRange {
        /// The requested index.
        index: usize,
        /// Number of blocks in the document.
        len: usize,
    },
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

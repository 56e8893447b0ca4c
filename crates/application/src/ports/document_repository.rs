//! Document storage port

use std::future::Future;
use std::path::Path;

use blockmark_domain::Document;
use thiserror::Error;

/// Errors from loading or saving documents.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The file could not be read or written.
    #[error("IO error at {path}: {message}")]
    Io {
        /// Path being accessed.
        path: String,
        /// Underlying error message.
        message: String,
    },

    /// The file is not a valid document export.
    #[error("invalid document {path}: {message}")]
    Invalid {
        /// Path being read.
        path: String,
        /// What was wrong with the content.
        message: String,
    },

    /// The document could not be encoded.
    #[error("could not encode document: {0}")]
    Encode(String),
}

/// Port for importing and exporting documents.
pub trait DocumentRepository: Send + Sync {
    /// Loads a document from the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or lacks the
    /// `blocks`/`variables` arrays.
    fn load(&self, path: &Path) -> impl Future<Output = Result<Document, DocumentError>> + Send;

    /// Saves a document to the given path, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be encoded or written.
    fn save(
        &self,
        path: &Path,
        document: &Document,
    ) -> impl Future<Output = Result<(), DocumentError>> + Send;
}

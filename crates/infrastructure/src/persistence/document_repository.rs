//! File-based document import and export.
//!
//! A document is stored as a single JSON file:
//! ```text
//! {
//!   "blocks": [ { "id": ..., "type": "h1", "content": ... }, ... ],
//!   "variables": [ { "id": ..., "key": ..., "value": ... }, ... ]
//! }
//! ```

use std::path::Path;

use blockmark_application::ports::{DocumentError, DocumentRepository};
use blockmark_domain::Document;
use tokio::fs;

use crate::serialization::{decode_json_bytes, encode_json_bytes};

/// Document repository backed by JSON files on disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileDocumentRepository;

impl FileDocumentRepository {
    /// Creates a new file-based document repository.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

fn io_error(path: &Path, error: &std::io::Error) -> DocumentError {
    DocumentError::Io {
        path: path.display().to_string(),
        message: error.to_string(),
    }
}

impl DocumentRepository for FileDocumentRepository {
    async fn load(&self, path: &Path) -> Result<Document, DocumentError> {
        let bytes = fs::read(path).await.map_err(|e| io_error(path, &e))?;
        let document: Document =
            decode_json_bytes(&bytes).map_err(|e| DocumentError::Invalid {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        tracing::debug!(
            path = %path.display(),
            blocks = document.blocks.len(),
            variables = document.variables.len(),
            "loaded document"
        );
        Ok(document)
    }

    async fn save(&self, path: &Path, document: &Document) -> Result<(), DocumentError> {
        let content =
            encode_json_bytes(document).map_err(|e| DocumentError::Encode(e.to_string()))?;

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| io_error(parent, &e))?;
        }
        fs::write(path, content)
            .await
            .map_err(|e| io_error(path, &e))?;

        tracing::debug!(path = %path.display(), "saved document");
        Ok(())
    }
}

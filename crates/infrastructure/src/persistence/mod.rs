//! File-based persistence for documents and settings.

mod document_repository;
mod settings_repository;

pub use document_repository::FileDocumentRepository;
pub use settings_repository::{SettingsError, SettingsRepository};

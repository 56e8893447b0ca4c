//! Blockmark Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer.

pub mod adapters;
pub mod persistence;
pub mod serialization;

pub use adapters::GeminiContentGenerator;
pub use persistence::{FileDocumentRepository, SettingsError, SettingsRepository};
pub use serialization::{
    SerializationError, decode_json, decode_json_bytes, encode_json, encode_json_bytes,
};

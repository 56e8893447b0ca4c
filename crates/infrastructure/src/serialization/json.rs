//! JSON encoding and decoding for Blockmark files.
//!
//! Decoding errors are split by cause: text that is not JSON at all is a
//! [`SerializationError::Syntax`] error, while well-formed JSON of the wrong
//! shape (for example a document without `variables`) is a
//! [`SerializationError::Shape`] error. Both carry the position reported by
//! the parser.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::error::Category;

/// Error type for serialization operations.
#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    /// The value could not be encoded.
    #[error("JSON encoding failed: {0}")]
    Encode(#[from] serde_json::Error),

    /// The input is not well-formed JSON.
    #[error("malformed JSON at line {line}, column {column}: {message}")]
    Syntax {
        /// 1-based line of the error.
        line: usize,
        /// 1-based column of the error.
        column: usize,
        /// Parser message.
        message: String,
    },

    /// The input is JSON but does not have the expected structure.
    #[error("unexpected JSON structure at line {line}, column {column}: {message}")]
    Shape {
        /// 1-based line of the error.
        line: usize,
        /// 1-based column of the error.
        column: usize,
        /// Parser message, naming the missing or mistyped field.
        message: String,
    },
}

impl SerializationError {
    fn decode(error: &serde_json::Error) -> Self {
        let (line, column) = (error.line(), error.column());
        let message = error.to_string();
        match error.classify() {
            Category::Data => Self::Shape {
                line,
                column,
                message,
            },
            Category::Syntax | Category::Eof | Category::Io => Self::Syntax {
                line,
                column,
                message,
            },
        }
    }
}

/// Encodes a value as pretty JSON with 2-space indentation and a trailing
/// newline. Fields keep their declaration order, so output is stable.
///
/// # Errors
///
/// Returns an error if the value cannot be represented as JSON.
pub fn encode_json<T: Serialize>(value: &T) -> Result<String, SerializationError> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    Ok(json)
}

/// Same as [`encode_json`], as bytes ready for writing.
///
/// # Errors
///
/// Returns an error if the value cannot be represented as JSON.
pub fn encode_json_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, SerializationError> {
    encode_json(value).map(String::into_bytes)
}

/// Decodes a value from JSON text.
///
/// # Errors
///
/// Returns `Syntax` for malformed input and `Shape` for well-formed input
/// that does not match `T`.
pub fn decode_json<T: DeserializeOwned>(json: &str) -> Result<T, SerializationError> {
    decode_json_bytes(json.as_bytes())
}

/// Decodes a value from JSON bytes.
///
/// # Errors
///
/// Returns `Syntax` for malformed input and `Shape` for well-formed input
/// that does not match `T`.
pub fn decode_json_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, SerializationError> {
    serde_json::from_slice(bytes).map_err(|e| SerializationError::decode(&e))
}

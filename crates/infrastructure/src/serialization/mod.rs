//! JSON serialization for Blockmark files.
//!
//! Exports stay diff-friendly:
//! - Struct fields in declaration order, arrays in document order
//! - 2-space indentation
//! - Trailing newline
//! - UTF-8 without BOM

mod json;

pub use json::{
    SerializationError, decode_json, decode_json_bytes, encode_json, encode_json_bytes,
};

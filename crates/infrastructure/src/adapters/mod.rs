//! Adapters implementing application ports against external services.

mod gemini_client;

pub use gemini_client::{GeminiContentGenerator, writer_prompt};

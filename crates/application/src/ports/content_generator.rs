//! Content generator port

use std::future::Future;

use thiserror::Error;

/// Error returned by a content generator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// No API key or credentials were configured.
    #[error("content generator is not configured: {0}")]
    NotConfigured(String),

    /// The request could not be sent or timed out.
    #[error("request failed: {0}")]
    Request(String),

    /// The service answered with a non-success status.
    #[error("service returned status {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body or reason.
        message: String,
    },

    /// The response did not contain any generated text.
    #[error("response contained no text")]
    EmptyResponse,
}

/// Port for turning a prompt into generated text.
///
/// Implemented by adapters for external generative services. Rendering
/// never calls this; callers await it and merge the text into a block
/// before the next render.
pub trait ContentGenerator: Send + Sync {
    /// Generates content for the prompt.
    ///
    /// # Errors
    ///
    /// Returns an error if the service is unreachable, misconfigured or
    /// returns no text.
    fn generate(
        &self,
        prompt: &str,
    ) -> impl Future<Output = Result<String, GenerationError>> + Send;
}

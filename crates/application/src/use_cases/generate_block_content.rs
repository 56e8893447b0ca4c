//! Generate block content use case.

use blockmark_domain::Document;

use crate::ApplicationResult;
use crate::ports::ContentGenerator;

/// Content written when the prompt is empty.
pub const EMPTY_PROMPT_TEXT: &str = "Prompt is empty.";

/// Content written when the generator fails.
pub const GENERATION_FAILED_TEXT: &str = "Sorry, I was unable to generate content at this time.";

/// Output from generating a block's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateBlockContentOutput {
    /// Id of the block that was updated.
    pub block_id: String,
    /// The new block content.
    pub content: String,
    /// Whether the generator failed and the fallback text was used.
    pub fell_back: bool,
}

/// Use case for replacing a block's content with generated text.
///
/// The block's current content is the prompt.
pub struct GenerateBlockContent<G: ContentGenerator> {
    generator: G,
}

impl<G: ContentGenerator> GenerateBlockContent<G> {
    /// Creates a new `GenerateBlockContent` use case.
    #[must_use]
    pub const fn new(generator: G) -> Self {
        Self { generator }
    }

    /// Generates content for a block and stores it in the document.
    ///
    /// Generator failures are logged and replaced by a fixed apology text
    /// so the author always sees a result in the block.
    ///
    /// # Errors
    ///
    /// Returns an error if the document has no block with `block_id`.
    pub async fn execute(
        &self,
        document: &mut Document,
        block_id: &str,
    ) -> ApplicationResult<GenerateBlockContentOutput> {
        let block = document.block_mut(block_id)?;
        let prompt = block.content.clone();

        let (content, fell_back) = if prompt.is_empty() {
            (EMPTY_PROMPT_TEXT.to_string(), false)
        } else {
            match self.generator.generate(&prompt).await {
                Ok(text) => (text, false),
                Err(error) => {
                    tracing::warn!(block = %block_id, %error, "content generation failed");
                    (GENERATION_FAILED_TEXT.to_string(), true)
                }
            }
        };

        block.content.clone_from(&content);

        Ok(GenerateBlockContentOutput {
            block_id: block_id.to_string(),
            content,
            fell_back,
        })
    }
}

//! Render document use case.

use blockmark_domain::{Document, RenderSettings};

use crate::renderer::render_blocks;
use crate::variable_resolver::{ResolutionResult, VariableResolver, substitute_with_policy};

/// Output from rendering a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderDocumentOutput {
    /// The final Markdown with all variables substituted.
    pub markdown: String,
    /// The variable resolution that produced it.
    pub resolution: ResolutionResult,
}

/// Use case for rendering a document to Markdown.
///
/// Every call is a full pass over an immutable snapshot: blocks are
/// rendered, variables are resolved from scratch, and the values are
/// substituted into the body. Identical input gives identical output.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderDocument {
    settings: RenderSettings,
}

impl RenderDocument {
    /// Creates a new `RenderDocument` use case.
    #[must_use]
    pub const fn new(settings: RenderSettings) -> Self {
        Self { settings }
    }

    /// Renders the document.
    #[must_use]
    pub fn execute(&self, document: &Document) -> RenderDocumentOutput {
        let body = render_blocks(&document.blocks);
        let resolution = VariableResolver::new(&document.variables).resolve();
        let markdown =
            substitute_with_policy(&body, &resolution.values, self.settings.unknown_tokens);

        tracing::debug!(
            blocks = document.blocks.len(),
            variables = resolution.len(),
            bytes = markdown.len(),
            "rendered document"
        );

        RenderDocumentOutput {
            markdown,
            resolution,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use blockmark_domain::sentinel::CIRCULAR_REFERENCE;
    use blockmark_domain::{BlockKind, ContentBlock, TableData, UnknownTokenPolicy, Variable};
    use pretty_assertions::assert_eq;

    fn render(document: &Document) -> String {
        RenderDocument::default().execute(document).markdown
    }

    #[test]
    fn test_sample_document_renders() {
        let markdown = render(&Document::sample());
        assert!(markdown.starts_with("# Welcome to the Structured Markdown Editor\n\n"));
        assert!(markdown.contains("Use variables like Awesome Gadget which is defined below."));
        assert!(markdown.contains("The release date is 2024-10-26."));
        assert!(!markdown.contains("{{"));
    }

    #[test]
    fn test_computed_variables_in_body() {
        let document = Document::with_content(
            vec![ContentBlock::new(
                BlockKind::Paragraph,
                "Price {{price}}, with tax {{tax}}",
            )],
            vec![
                Variable::new("tax", "{{price}} * 1.1"),
                Variable::new("price", "10"),
            ],
        );
        assert_eq!(render(&document), "Price 10, with tax 11");
    }

    #[test]
    fn test_unknown_reference_in_body() {
        let document = Document::with_content(
            vec![ContentBlock::new(
                BlockKind::Paragraph,
                "Value: {{missing}}",
            )],
            Vec::new(),
        );
        assert_eq!(render(&document), "Value: [Unknown: missing]");

        let keep = RenderDocument::new(RenderSettings {
            unknown_tokens: UnknownTokenPolicy::Keep,
        });
        assert_eq!(keep.execute(&document).markdown, "Value: {{missing}}");
    }

    #[test]
    fn test_blank_keyed_variable_is_unknown() {
        let document = Document::with_content(
            vec![ContentBlock::new(BlockKind::Paragraph, "{{}}")],
            vec![Variable::new("", "hidden")],
        );
        assert_eq!(render(&document), "[Unknown: ]");
    }

    #[test]
    fn test_cycle_surfaces_sentinel() {
        let document = Document::with_content(
            vec![ContentBlock::new(BlockKind::Paragraph, "{{x}}/{{y}}")],
            vec![Variable::new("x", "{{y}}"), Variable::new("y", "{{x}}")],
        );
        let output = RenderDocument::default().execute(&document);
        assert_eq!(
            output.markdown,
            format!("{CIRCULAR_REFERENCE}/{CIRCULAR_REFERENCE}")
        );
        assert!(!output.resolution.is_complete());
    }

    #[test]
    fn test_variables_inside_table_cells() {
        let table = TableData::new(
            vec!["Product".to_string()],
            vec![vec!["{{product_name}}".to_string()]],
        );
        let document = Document::with_content(
            vec![ContentBlock::new(BlockKind::Table, table.to_json())],
            vec![Variable::new("product_name", "Gadget")],
        );
        assert_eq!(render(&document), "| Product |\n| --- |\n| Gadget |");
    }

    #[test]
    fn test_render_is_idempotent() {
        let document = Document::sample();
        let use_case = RenderDocument::default();
        assert_eq!(use_case.execute(&document), use_case.execute(&document));
    }
}

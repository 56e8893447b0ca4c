//! Block-to-Markdown rendering.
//!
//! Turns each content block into Markdown text and joins the results with a
//! blank line. Variable substitution happens afterwards on the joined body.

use blockmark_domain::sentinel::INVALID_TABLE;
use blockmark_domain::{BlockKind, ContentBlock, TableData};

/// Separator placed between rendered blocks.
pub const BLOCK_SEPARATOR: &str = "\n\n";

/// Renders a single block to Markdown.
#[must_use]
pub fn render_block(block: &ContentBlock) -> String {
    match block.kind {
        BlockKind::Heading1 => format!("# {}", block.content),
        BlockKind::Heading2 => format!("## {}", block.content),
        BlockKind::Heading3 => format!("### {}", block.content),
        BlockKind::Paragraph => block.content.clone(),
        BlockKind::UnorderedList => render_list(&block.content),
        BlockKind::Code => format!("```\n{}\n```", block.content),
        BlockKind::Table => match TableData::from_json(&block.content) {
            Ok(table) => table_to_markdown(&table),
            Err(error) => {
                tracing::debug!(block = %block.id, %error, "table block has invalid data");
                INVALID_TABLE.to_string()
            }
        },
        BlockKind::Unknown => String::new(),
    }
}

fn render_list(content: &str) -> String {
    content
        .split('\n')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| format!("- {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Serializes a table as pipe-delimited Markdown rows.
///
/// Produces a header row, a `---` separator cell per header, then one line
/// per data row. A table missing headers or rows renders to nothing.
#[must_use]
pub fn table_to_markdown(table: &TableData) -> String {
    let (Some(headers), Some(rows)) = (&table.headers, &table.rows) else {
        return String::new();
    };

    let header = format!("| {} |", headers.join(" | "));
    let separator = format!("| {} |", vec!["---"; headers.len()].join(" | "));
    let body = rows
        .iter()
        .map(|row| format!("| {} |", row.join(" | ")))
        .collect::<Vec<_>>()
        .join("\n");

    format!("{header}\n{separator}\n{body}")
}

/// Renders all blocks and joins them with a blank line.
#[must_use]
pub fn render_blocks(blocks: &[ContentBlock]) -> String {
    blocks
        .iter()
        .map(render_block)
        .collect::<Vec<_>>()
        .join(BLOCK_SEPARATOR)
}

//! Content block types

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{DomainError, DomainResult};
use crate::id::generate_id;

/// Content shown when a table block is converted to another kind.
pub const TABLE_CONVERTED_TEXT: &str = "Table content converted to text.";

/// The kind of a content block, serialized with its short tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockKind {
    /// Top-level heading (`# `).
    #[serde(rename = "h1")]
    Heading1,
    /// Second-level heading (`## `).
    #[serde(rename = "h2")]
    Heading2,
    /// Third-level heading (`### `).
    #[serde(rename = "h3")]
    Heading3,
    /// Plain paragraph, rendered verbatim.
    #[serde(rename = "p")]
    Paragraph,
    /// Bulleted list, one item per line.
    #[serde(rename = "ul")]
    UnorderedList,
    /// Fenced code block.
    #[serde(rename = "code")]
    Code,
    /// Grid table stored as JSON [`TableData`].
    #[serde(rename = "table")]
    Table,
    /// A tag this version does not know. Renders to nothing.
    #[serde(rename = "unknown", other)]
    Unknown,
}

impl BlockKind {
    /// Returns the serialized tag for this kind.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Heading1 => "h1",
            Self::Heading2 => "h2",
            Self::Heading3 => "h3",
            Self::Paragraph => "p",
            Self::UnorderedList => "ul",
            Self::Code => "code",
            Self::Table => "table",
            Self::Unknown => "unknown",
        }
    }

    /// Parses a kind from its tag. Unrecognized tags map to `Unknown`.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "h1" => Self::Heading1,
            "h2" => Self::Heading2,
            "h3" => Self::Heading3,
            "p" => Self::Paragraph,
            "ul" => Self::UnorderedList,
            "code" => Self::Code,
            "table" => Self::Table,
            _ => Self::Unknown,
        }
    }
}

/// A single block of document content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBlock {
    /// Unique identifier.
    pub id: String,
    /// What kind of block this is.
    #[serde(rename = "type")]
    pub kind: BlockKind,
    /// Raw content. For tables this is JSON-encoded [`TableData`].
    pub content: String,
}

impl ContentBlock {
    /// Creates a block with a fresh id.
    #[must_use]
    pub fn new(kind: BlockKind, content: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            kind,
            content: content.into(),
        }
    }

    /// Creates an empty block of the given kind.
    ///
    /// Tables start with a small product/feature/status grid instead of
    /// empty content.
    #[must_use]
    pub fn empty(kind: BlockKind) -> Self {
        let content = if kind == BlockKind::Table {
            TableData::starter().to_json()
        } else {
            String::new()
        };
        Self::new(kind, content)
    }

    /// Switches the block to a new kind, converting content at the table boundary.
    pub fn change_kind(&mut self, kind: BlockKind) {
        if self.kind == BlockKind::Table && kind != BlockKind::Table {
            self.content = TABLE_CONVERTED_TEXT.to_string();
        } else if self.kind != BlockKind::Table && kind == BlockKind::Table {
            self.content = TableData::placeholder().to_json();
        }
        self.kind = kind;
    }
}

/// Grid table content: a header row and data rows of cell text.
///
/// Both fields are optional on the wire. A table missing either one renders
/// to nothing rather than an error. Scalar cells (numbers, booleans, null)
/// are read as their text; nested arrays or objects are invalid.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TableData {
    /// Column headers.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "scalar_cells"
    )]
    pub headers: Option<Vec<String>>,
    /// Data rows, each a list of cells.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "scalar_rows"
    )]
    pub rows: Option<Vec<Vec<String>>>,
}

impl TableData {
    /// Creates a table from headers and rows.
    #[must_use]
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            headers: Some(headers),
            rows: Some(rows),
        }
    }

    /// Parses table JSON as stored in a table block.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTableData` if the text is not a JSON
    /// object whose headers and cells are scalars.
    pub fn from_json(content: &str) -> DomainResult<Self> {
        serde_json::from_str(content).map_err(|e| DomainError::InvalidTableData(e.to_string()))
    }

    /// Encodes the table as compact JSON for block storage.
    #[must_use]
    pub fn to_json(&self) -> String {
        // Only strings and Options of Vecs: encoding cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }

    /// The grid a newly added table block starts with.
    #[must_use]
    pub fn starter() -> Self {
        Self::new(
            strings(&["Product", "Feature", "Status"]),
            vec![
                strings(&["{{product_name}}", "AI Integration", "In Progress"]),
                strings(&["{{product_name}}", "Dark Mode", "Done"]),
            ],
        )
    }

    /// The grid a block gets when converted into a table.
    #[must_use]
    pub fn placeholder() -> Self {
        Self::new(
            strings(&["Header 1", "Header 2"]),
            vec![strings(&["Cell 1", "Cell 2"])],
        )
    }
}

fn cell_text(value: Value) -> Result<String, String> {
    match value {
        Value::String(text) => Ok(text),
        Value::Number(number) => Ok(number.to_string()),
        Value::Bool(flag) => Ok(flag.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(format!("table cell must be a scalar, found {other}")),
    }
}

fn cell_list(cells: Vec<Value>) -> Result<Vec<String>, String> {
    cells.into_iter().map(cell_text).collect()
}

fn scalar_cells<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<Value>>::deserialize(deserializer)?
        .map(cell_list)
        .transpose()
        .map_err(D::Error::custom)
}

fn scalar_rows<'de, D>(deserializer: D) -> Result<Option<Vec<Vec<String>>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<Vec<Value>>>::deserialize(deserializer)?
        .map(|rows| rows.into_iter().map(cell_list).collect())
        .transpose()
        .map_err(D::Error::custom)
}

fn strings(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|s| (*s).to_string()).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_block_kind_tags_roundtrip() {
        for kind in [
            BlockKind::Heading1,
            BlockKind::Heading2,
            BlockKind::Heading3,
            BlockKind::Paragraph,
            BlockKind::UnorderedList,
            BlockKind::Code,
            BlockKind::Table,
        ] {
            assert_eq!(BlockKind::from_tag(kind.tag()), kind);
        }
        assert_eq!(BlockKind::from_tag("blockquote"), BlockKind::Unknown);
    }

    #[test]
    fn test_block_serializes_kind_as_type() {
        let block = ContentBlock {
            id: "b1".to_string(),
            kind: BlockKind::Heading2,
            content: "Title".to_string(),
        };
        let json = serde_json::to_string(&block).unwrap();
        assert_eq!(json, r#"{"id":"b1","type":"h2","content":"Title"}"#);
    }

    #[test]
    fn test_unknown_block_type_deserializes() {
        let block: ContentBlock =
            serde_json::from_str(r#"{"id":"x","type":"quote","content":"hi"}"#).unwrap();
        assert_eq!(block.kind, BlockKind::Unknown);
    }

    #[test]
    fn test_empty_table_block_has_starter_grid() {
        let block = ContentBlock::empty(BlockKind::Table);
        let table = TableData::from_json(&block.content).unwrap();
        assert_eq!(table.headers.unwrap(), vec!["Product", "Feature", "Status"]);
        assert_eq!(table.rows.unwrap().len(), 2);

        let paragraph = ContentBlock::empty(BlockKind::Paragraph);
        assert!(paragraph.content.is_empty());
    }

    #[test]
    fn test_change_kind_from_table_replaces_content() {
        let mut block = ContentBlock::empty(BlockKind::Table);
        block.change_kind(BlockKind::Paragraph);
        assert_eq!(block.kind, BlockKind::Paragraph);
        assert_eq!(block.content, TABLE_CONVERTED_TEXT);
    }

    #[test]
    fn test_change_kind_to_table_installs_placeholder() {
        let mut block = ContentBlock::new(BlockKind::Paragraph, "some text");
        block.change_kind(BlockKind::Table);
        assert_eq!(block.kind, BlockKind::Table);
        assert_eq!(
            TableData::from_json(&block.content).unwrap(),
            TableData::placeholder()
        );
    }

    #[test]
    fn test_change_kind_between_text_kinds_keeps_content() {
        let mut block = ContentBlock::new(BlockKind::Paragraph, "keep me");
        block.change_kind(BlockKind::Heading1);
        assert_eq!(block.kind, BlockKind::Heading1);
        assert_eq!(block.content, "keep me");
    }

    #[test]
    fn test_table_missing_fields_parse_as_none() {
        let table = TableData::from_json(r#"{"headers":["A"]}"#).unwrap();
        assert!(table.rows.is_none());
    }

    #[test]
    fn test_table_invalid_json_is_error() {
        let err = TableData::from_json("not json").unwrap_err();
        assert!(matches!(err, DomainError::InvalidTableData(_)));
        assert!(TableData::from_json("null").is_err());
    }

    #[test]
    fn test_table_scalar_cells_become_text() {
        let json = r#"{"headers":["A",2],"rows":[[1,2.5],[true,null]]}"#;
        let table = TableData::from_json(json).unwrap();
        assert_eq!(table.headers, Some(strings(&["A", "2"])));
        assert_eq!(
            table.rows,
            Some(vec![strings(&["1", "2.5"]), strings(&["true", ""])])
        );
    }

    #[test]
    fn test_table_nested_cells_are_error() {
        let err = TableData::from_json(r#"{"headers":["A"],"rows":[[[1]]]}"#).unwrap_err();
        assert!(matches!(err, DomainError::InvalidTableData(_)));
        assert!(TableData::from_json(r#"{"headers":[{"a":1}],"rows":[]}"#).is_err());
    }
}

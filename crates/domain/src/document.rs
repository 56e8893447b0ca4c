//! Document aggregate
//!
//! A document is the ordered list of content blocks plus the variables
//! referenced from them. It is the unit that gets rendered, saved and loaded.

use serde::{Deserialize, Serialize};

use crate::block::{BlockKind, ContentBlock};
use crate::error::{DomainError, DomainResult};
use crate::variable::Variable;

/// Default file name used when exporting a document.
pub const DEFAULT_EXPORT_FILE_NAME: &str = "structured-markdown-data.json";

/// Blocks and variables that together make up one templated document.
///
/// Both fields are required when deserializing, so a file missing either
/// array is rejected instead of silently loading half a document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Document {
    /// Content blocks in display order.
    pub blocks: Vec<ContentBlock>,
    /// Variables in declaration order.
    pub variables: Vec<Variable>,
}

impl Document {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a document from blocks and variables.
    #[must_use]
    pub const fn with_content(blocks: Vec<ContentBlock>, variables: Vec<Variable>) -> Self {
        Self { blocks, variables }
    }

    /// A short welcome document demonstrating blocks and variables.
    #[must_use]
    pub fn sample() -> Self {
        Self {
            blocks: vec![
                ContentBlock::new(
                    BlockKind::Heading1,
                    "Welcome to the Structured Markdown Editor",
                ),
                ContentBlock::new(
                    BlockKind::Paragraph,
                    "This is a grid-based editor. Add, edit, or remove blocks. \
                     You can also generate content with AI!",
                ),
                ContentBlock::new(
                    BlockKind::Paragraph,
                    "Try typing 'a short story about a robot who discovers music' into this \
                     block and run `blockmark generate` on it.",
                ),
                ContentBlock::new(
                    BlockKind::Paragraph,
                    "Use variables like {{product_name}} which is defined below. \
                     The release date is {{release_date}}.",
                ),
            ],
            variables: vec![
                Variable::new("product_name", "Awesome Gadget"),
                Variable::new("release_date", "2024-10-26"),
            ],
        }
    }

    /// Returns the block with the given id.
    #[must_use]
    pub fn block(&self, id: &str) -> Option<&ContentBlock> {
        self.blocks.iter().find(|b| b.id == id)
    }

    /// Returns a mutable reference to the block with the given id.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::BlockNotFound` if no block has this id.
    pub fn block_mut(&mut self, id: &str) -> DomainResult<&mut ContentBlock> {
        self.blocks
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| DomainError::BlockNotFound(id.to_string()))
    }

    /// Appends an empty block of the given kind and returns its id.
    pub fn add_block(&mut self, kind: BlockKind) -> String {
        let block = ContentBlock::empty(kind);
        let id = block.id.clone();
        self.blocks.push(block);
        id
    }

    /// Replaces a block's content.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::BlockNotFound` if no block has this id.
    pub fn update_block(&mut self, id: &str, content: impl Into<String>) -> DomainResult<()> {
        self.block_mut(id)?.content = content.into();
        Ok(())
    }

    /// Changes a block's kind, converting table content as needed.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::BlockNotFound` if no block has this id.
    pub fn change_block_kind(&mut self, id: &str, kind: BlockKind) -> DomainResult<()> {
        self.block_mut(id)?.change_kind(kind);
        Ok(())
    }

    /// Removes a block.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::BlockNotFound` if no block has this id.
    pub fn delete_block(&mut self, id: &str) -> DomainResult<ContentBlock> {
        let index = self.block_index(id)?;
        Ok(self.blocks.remove(index))
    }

    /// Moves a block to a new position.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::BlockNotFound` for an unknown id and
    /// `DomainError::BlockIndexOutOfRange` if `to` is past the last block.
    pub fn move_block(&mut self, id: &str, to: usize) -> DomainResult<()> {
        let from = self.block_index(id)?;
        if to >= self.blocks.len() {
            return Err(DomainError::BlockIndexOutOfRange {
                index: to,
                len: self.blocks.len(),
            });
        }
        let block = self.blocks.remove(from);
        self.blocks.insert(to, block);
        Ok(())
    }

    fn block_index(&self, id: &str) -> DomainResult<usize> {
        self.blocks
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| DomainError::BlockNotFound(id.to_string()))
    }

    /// Appends a variable with empty key and value and returns its id.
    pub fn add_variable(&mut self) -> String {
        let variable = Variable::default();
        let id = variable.id.clone();
        self.variables.push(variable);
        id
    }

    /// Sets a variable's key.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::VariableNotFound` if no variable has this id.
    pub fn set_variable_key(&mut self, id: &str, key: impl Into<String>) -> DomainResult<()> {
        self.variable_mut(id)?.key = key.into();
        Ok(())
    }

    /// Sets a variable's raw value.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::VariableNotFound` if no variable has this id.
    pub fn set_variable_value(&mut self, id: &str, value: impl Into<String>) -> DomainResult<()> {
        self.variable_mut(id)?.value = value.into();
        Ok(())
    }

    /// Removes a variable.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::VariableNotFound` if no variable has this id.
    pub fn delete_variable(&mut self, id: &str) -> DomainResult<Variable> {
        let index = self
            .variables
            .iter()
            .position(|v| v.id == id)
            .ok_or_else(|| DomainError::VariableNotFound(id.to_string()))?;
        Ok(self.variables.remove(index))
    }

    fn variable_mut(&mut self, id: &str) -> DomainResult<&mut Variable> {
        self.variables
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or_else(|| DomainError::VariableNotFound(id.to_string()))
    }
}

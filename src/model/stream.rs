//! The content stream handed to the renderer.

use super::{FlowBlock, Heading};
use serde::{Deserialize, Serialize};

/// One entry of the content stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamItem {
    /// A block laid out on its own
    Block(FlowBlock),

    /// Blocks that must not be split across a page boundary
    KeepTogether(Vec<FlowBlock>),
}

impl StreamItem {
    /// Blocks in this item, in order.
    pub fn blocks(&self) -> &[FlowBlock] {
        match self {
            StreamItem::Block(block) => std::slice::from_ref(block),
            StreamItem::KeepTogether(blocks) => blocks,
        }
    }

    /// Check if this item is a keep-together group.
    pub fn is_group(&self) -> bool {
        matches!(self, StreamItem::KeepTogether(_))
    }
}

/// Append-only, ordered sequence of stream items.
///
/// Only the composer writes to a stream; everything else reads it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentStream {
    items: Vec<StreamItem>,
}

impl ContentStream {
    /// Create an empty stream.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_block(&mut self, block: FlowBlock) {
        self.items.push(StreamItem::Block(block));
    }

    pub(crate) fn push_group(&mut self, blocks: Vec<FlowBlock>) {
        debug_assert!(!blocks.is_empty(), "keep-together group must not be empty");
        self.items.push(StreamItem::KeepTogether(blocks));
    }

    /// Stream items in order.
    pub fn items(&self) -> &[StreamItem] {
        &self.items
    }

    /// All blocks in order, with group boundaries flattened away.
    pub fn blocks(&self) -> impl Iterator<Item = &FlowBlock> {
        self.items.iter().flat_map(|item| item.blocks().iter())
    }

    /// All headings in order.
    pub fn headings(&self) -> impl Iterator<Item = &Heading> {
        self.blocks().filter_map(FlowBlock::as_heading)
    }

    /// Number of stream items (a group counts once).
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if nothing has been appended.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of blocks, counting group members individually.
    pub fn block_count(&self) -> usize {
        self.items.iter().map(|item| item.blocks().len()).sum()
    }

    /// Number of keep-together groups.
    pub fn group_count(&self) -> usize {
        self.items.iter().filter(|item| item.is_group()).count()
    }
}

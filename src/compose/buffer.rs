//! Pending heading buffer.

use crate::model::FlowBlock;

/// Decoration blocks of the most recent heading, waiting for content.
///
/// Holds at most one heading's decoration set. Owned by a single
/// composer and emptied on every flush.
#[derive(Debug, Default)]
pub enum HeadingBuffer {
    /// Nothing pending
    #[default]
    Empty,
    /// A heading's decorations, not yet in the stream
    Pending(Vec<FlowBlock>),
}

impl HeadingBuffer {
    /// Check if a heading is waiting for content.
    pub fn is_pending(&self) -> bool {
        matches!(self, HeadingBuffer::Pending(_))
    }

    /// Number of buffered blocks.
    pub fn len(&self) -> usize {
        match self {
            HeadingBuffer::Empty => 0,
            HeadingBuffer::Pending(blocks) => blocks.len(),
        }
    }

    /// Check if nothing is buffered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Load a decoration set. The buffer must have been flushed first.
    pub fn load(&mut self, decorations: Vec<FlowBlock>) {
        debug_assert!(!self.is_pending(), "heading buffer loaded twice without a flush");
        if !decorations.is_empty() {
            *self = HeadingBuffer::Pending(decorations);
        }
    }

    /// Take the buffered blocks, leaving the buffer empty.
    pub fn take(&mut self) -> Option<Vec<FlowBlock>> {
        match std::mem::take(self) {
            HeadingBuffer::Empty => None,
            HeadingBuffer::Pending(blocks) => Some(blocks),
        }
    }
}

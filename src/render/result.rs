//! Rendering result with metadata and statistics.

use crate::model::{Document, FlowBlock, Metadata, StreamItem};
use serde::{Deserialize, Serialize};

/// Result of rendering a document, including content and statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResult {
    /// The rendered content (Markdown, text, etc.)
    pub content: String,

    /// Document metadata (copied from source document)
    pub metadata: Metadata,

    /// Rendering statistics
    pub stats: RenderStats,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(content: String, metadata: Metadata, stats: RenderStats) -> Self {
        Self {
            content,
            metadata,
            stats,
        }
    }
}

/// Statistics collected while rendering a content stream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderStats {
    /// Number of headings
    pub heading_count: u32,

    /// Number of paragraphs (including TOC rows)
    pub paragraph_count: u32,

    /// Number of tables
    pub table_count: u32,

    /// Number of code blocks
    pub code_block_count: u32,

    /// Number of callouts
    pub callout_count: u32,

    /// Number of step indicators
    pub step_count: u32,

    /// Number of severity badge rows
    pub badge_row_count: u32,

    /// Findings summed over all badge rows
    pub finding_count: u32,

    /// Number of internal links
    pub link_count: u32,

    /// Number of keep-together groups
    pub group_count: u32,

    /// Number of page breaks
    pub page_break_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count (excluding whitespace)
    pub char_count: u32,
}

impl RenderStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect statistics for a whole document.
    pub fn collect(doc: &Document) -> Self {
        let mut stats = Self::new();
        for item in doc.stream.items() {
            if let StreamItem::KeepTogether(_) = item {
                stats.add_group();
            }
            for block in item.blocks() {
                stats.add_block(block);
            }
        }
        stats.count_text(&doc.plain_text());
        stats
    }

    /// Count one block.
    pub fn add_block(&mut self, block: &FlowBlock) {
        match block {
            FlowBlock::Heading(_) => self.heading_count += 1,
            FlowBlock::Paragraph(p) => {
                self.paragraph_count += 1;
                self.link_count += p.link_targets().count() as u32;
            }
            FlowBlock::Table(_) => self.table_count += 1,
            FlowBlock::CodeBlock(_) => self.code_block_count += 1,
            FlowBlock::Callout(_) => self.callout_count += 1,
            FlowBlock::StepIndicator(_) => self.step_count += 1,
            FlowBlock::SeverityBadges(b) => {
                self.badge_row_count += 1;
                self.finding_count += b.total();
            }
            FlowBlock::PageBreak => self.page_break_count += 1,
            FlowBlock::AccentBar { .. } | FlowBlock::Spacer { .. } | FlowBlock::Cover(_) => {}
        }
    }

    /// Increment group count.
    pub fn add_group(&mut self) {
        self.group_count += 1;
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        // Word count: whitespace-separated tokens
        self.word_count += text.split_whitespace().count() as u32;

        // Character count: non-whitespace characters
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }
}

//! The flow composer.

use super::{ComposeOptions, HeadingBuffer};
use crate::anchor::{derive_anchor, Anchor};
use crate::error::Result;
use crate::model::{
    Callout, CodeBlock, Content, ContentStream, Cover, CoverStyle, Document, FlowBlock, Heading,
    HeadingLevel, Markup, Metadata, Paragraph, ParagraphStyle, Severity, SeverityBadges,
    StepIndicator, Table,
};
use crate::toc::{self, TocEntry};

/// Sequences headings and content into a content stream.
///
/// A heading is held back until the next content block arrives; the two
/// are then appended as one keep-together group, so the heading never
/// ends up alone at the bottom of a page. A spacer, page break or another
/// heading in between releases the held heading on its own.
///
/// # Example
///
/// ```
/// use flowdoc::{FlowComposer, Metadata};
///
/// let mut composer = FlowComposer::new(Metadata::with_title("Notes"))?;
/// composer.section_heading("1. Overview");
/// composer.body("First paragraph.");
/// let doc = composer.finalize();
///
/// assert_eq!(doc.stream.group_count(), 1);
/// # Ok::<(), flowdoc::Error>(())
/// ```
#[derive(Debug)]
pub struct FlowComposer {
    options: ComposeOptions,
    metadata: Metadata,
    stream: ContentStream,
    buffer: HeadingBuffer,
}

impl FlowComposer {
    /// Create a composer with default options.
    pub fn new(metadata: Metadata) -> Result<Self> {
        Self::with_options(metadata, ComposeOptions::default())
    }

    /// Create a composer with custom options.
    ///
    /// Fails if the page layout leaves no content area.
    pub fn with_options(metadata: Metadata, options: ComposeOptions) -> Result<Self> {
        options.layout.validate()?;
        Ok(Self {
            options,
            metadata,
            stream: ContentStream::new(),
            buffer: HeadingBuffer::default(),
        })
    }

    /// Composition options.
    pub fn options(&self) -> &ComposeOptions {
        &self.options
    }

    /// Usable width of the page.
    pub fn content_width(&self) -> f32 {
        self.options.layout.content_width()
    }

    /// Check if a heading is waiting for its first content block.
    pub fn is_pending(&self) -> bool {
        self.buffer.is_pending()
    }

    /// The stream composed so far, excluding any pending heading.
    pub fn stream(&self) -> &ContentStream {
        &self.stream
    }

    /// Start a heading.
    ///
    /// Any heading still pending is released unbonded first. Returns the
    /// derived anchor.
    pub fn heading(&mut self, level: HeadingLevel, text: impl Into<Markup>) -> Anchor {
        self.flush_unbonded();

        let text = text.into();
        let anchor = derive_anchor(text.as_str());
        let decorations = self.decorations(level, text, anchor.clone());
        self.buffer.load(decorations);

        anchor
    }

    /// Level-1 heading; starts on a new page.
    pub fn section_heading(&mut self, text: impl Into<Markup>) -> Anchor {
        self.heading(HeadingLevel::Section, text)
    }

    /// Level-2 heading.
    pub fn sub_heading(&mut self, text: impl Into<Markup>) -> Anchor {
        self.heading(HeadingLevel::Subsection, text)
    }

    /// Level-3 heading.
    pub fn sub_sub_heading(&mut self, text: impl Into<Markup>) -> Anchor {
        self.heading(HeadingLevel::Subsubsection, text)
    }

    /// Append a content block, bonding it to a pending heading.
    pub fn content(&mut self, content: impl Into<Content>) {
        let block = FlowBlock::from(content.into());
        match self.buffer.take() {
            Some(mut group) => {
                log::debug!(
                    "bonding {} heading blocks with {}",
                    group.len(),
                    block.kind()
                );
                group.push(block);
                self.stream.push_group(group);
            }
            None => self.stream.push_block(block),
        }
    }

    /// Body paragraph.
    pub fn body(&mut self, text: impl Into<Markup>) {
        self.content(Paragraph::body(text));
    }

    /// Small body paragraph.
    pub fn body_small(&mut self, text: impl Into<Markup>) {
        self.content(Paragraph::small(text));
    }

    /// Callout with an explicit severity and title.
    pub fn callout(&mut self, callout: Callout) {
        self.content(callout);
    }

    /// Analogy callout.
    pub fn analogy(&mut self, text: impl Into<Markup>) {
        self.content(Callout::new(text, Severity::Note));
    }

    /// Key insight callout.
    pub fn info_box(&mut self, text: impl Into<Markup>) {
        self.content(Callout::new(text, Severity::Info));
    }

    /// Warning callout.
    pub fn warning_box(&mut self, text: impl Into<Markup>) {
        self.content(Callout::new(text, Severity::Warning));
    }

    /// Critical callout.
    pub fn critical_box(&mut self, text: impl Into<Markup>) {
        self.content(Callout::new(text, Severity::Critical));
    }

    /// Code block.
    pub fn code(&mut self, text: impl Into<String>, language: impl Into<String>) {
        self.content(CodeBlock::new(text, language));
    }

    /// Card table.
    pub fn table(&mut self, table: Table) {
        self.content(table);
    }

    /// Procedure step.
    pub fn step(&mut self, step: StepIndicator) {
        self.content(step);
    }

    /// Heading immediately followed by its first paragraph.
    pub fn heading_with_content(
        &mut self,
        level: HeadingLevel,
        heading: impl Into<Markup>,
        body: impl Into<Markup>,
    ) -> Anchor {
        let anchor = self.heading(level, heading);
        self.body(body);
        anchor
    }

    /// Vertical whitespace.
    ///
    /// Releases a pending heading unbonded; the spacer itself is never
    /// part of a keep-together group.
    pub fn spacer(&mut self, height: f32) {
        self.push_direct(FlowBlock::Spacer { height });
    }

    /// Forced page break.
    pub fn page_break(&mut self) {
        self.push_direct(FlowBlock::PageBreak);
    }

    /// Row of finding counts by severity.
    ///
    /// Appended directly; a pending heading is released unbonded first.
    pub fn severity_badges(&mut self, badges: SeverityBadges) {
        self.push_direct(FlowBlock::SeverityBadges(badges));
    }

    /// Cover page built from the document metadata.
    pub fn cover(&mut self, style: CoverStyle) {
        let cover = Cover::from_metadata(&self.metadata, style);
        self.push_direct(FlowBlock::Cover(cover));
    }

    /// Clickable table of contents, followed by a page break.
    ///
    /// Links target the anchors headings will carry; the entries are not
    /// checked against the body.
    pub fn table_of_contents(&mut self, entries: &[TocEntry]) {
        self.push_direct(FlowBlock::Paragraph(Paragraph::new(
            Markup::text(&self.options.toc_title),
            ParagraphStyle::Title,
        )));
        self.push_direct(self.accent_bar());
        self.push_direct(FlowBlock::Spacer {
            height: self.options.toc_spacing,
        });
        for row in toc::link_rows(entries) {
            self.push_direct(FlowBlock::Paragraph(row));
        }
        self.push_direct(FlowBlock::PageBreak);
    }

    /// Release any pending heading and return the finished document.
    pub fn finalize(mut self) -> Document {
        self.flush_unbonded();
        log::debug!(
            "finalized stream: {} items, {} blocks, {} groups",
            self.stream.len(),
            self.stream.block_count(),
            self.stream.group_count()
        );
        Document {
            metadata: self.metadata,
            layout: self.options.layout,
            stream: self.stream,
        }
    }

    fn push_direct(&mut self, block: FlowBlock) {
        self.flush_unbonded();
        self.stream.push_block(block);
    }

    fn flush_unbonded(&mut self) {
        if let Some(blocks) = self.buffer.take() {
            log::debug!("flushing {} heading blocks unbonded", blocks.len());
            for block in blocks {
                self.stream.push_block(block);
            }
        }
    }

    fn accent_bar(&self) -> FlowBlock {
        FlowBlock::AccentBar {
            width: self.content_width(),
            thickness: self.options.accent_bar_thickness,
        }
    }

    fn decorations(&self, level: HeadingLevel, text: Markup, anchor: Anchor) -> Vec<FlowBlock> {
        let spacing = self.options.spacing(level);
        let mut blocks = Vec::with_capacity(5);

        if level == HeadingLevel::Section {
            blocks.push(FlowBlock::PageBreak);
        }
        if spacing.before > 0.0 {
            blocks.push(FlowBlock::Spacer {
                height: spacing.before,
            });
        }
        blocks.push(FlowBlock::Heading(Heading {
            level,
            text,
            anchor,
        }));
        if level == HeadingLevel::Section {
            blocks.push(self.accent_bar());
        }
        if spacing.after > 0.0 {
            blocks.push(FlowBlock::Spacer {
                height: spacing.after,
            });
        }
        blocks
    }
}

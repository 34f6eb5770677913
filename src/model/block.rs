//! Flow block types: the units a content stream is made of.

use super::{Markup, Metadata, Paragraph, Table};
use crate::anchor::Anchor;
use crate::error::Error;
use serde::{Deserialize, Serialize};

/// Heading level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum HeadingLevel {
    /// Numbered section, starts a new page
    Section = 1,
    /// Subsection
    Subsection = 2,
    /// Sub-subsection
    Subsubsection = 3,
}

impl HeadingLevel {
    /// Numeric level (1-3).
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for HeadingLevel {
    type Error = Error;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            1 => Ok(HeadingLevel::Section),
            2 => Ok(HeadingLevel::Subsection),
            3 => Ok(HeadingLevel::Subsubsection),
            other => Err(Error::InvalidHeadingLevel(other)),
        }
    }
}

impl From<HeadingLevel> for u8 {
    fn from(level: HeadingLevel) -> Self {
        level.as_u8()
    }
}

/// An anchored heading title.
///
/// The anchor lives in its own field; it is never spliced into `text`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heading {
    /// Heading level
    pub level: HeadingLevel,

    /// Title markup
    pub text: Markup,

    /// Link target for this heading
    pub anchor: Anchor,
}

/// A fenced block of source code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeBlock {
    /// Code text, not markup
    pub text: String,

    /// Language hint (empty for none)
    #[serde(default)]
    pub language: String,
}

impl CodeBlock {
    /// Create a code block.
    pub fn new(text: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            language: language.into(),
        }
    }
}

/// Callout severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Analogies and asides
    #[default]
    Note,
    /// Key insights
    Info,
    /// Warnings
    Warning,
    /// Critical requirements
    Critical,
}

impl Severity {
    /// Title used when a callout does not name one.
    pub fn default_title(self) -> &'static str {
        match self {
            Severity::Note => "ANALOGY",
            Severity::Info => "KEY INSIGHT",
            Severity::Warning => "WARNING",
            Severity::Critical => "CRITICAL",
        }
    }
}

/// A boxed callout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Callout {
    /// Body markup
    pub text: Markup,

    /// Severity
    pub severity: Severity,

    /// Box title
    pub title: String,
}

impl Callout {
    /// Create a callout with the severity's default title.
    pub fn new(text: impl Into<Markup>, severity: Severity) -> Self {
        Self {
            text: text.into(),
            severity,
            title: severity.default_title().to_string(),
        }
    }

    /// Override the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

/// One step of a numbered procedure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepIndicator {
    /// 1-based step number
    pub index: u32,

    /// Step title
    pub title: String,

    /// Short description
    pub description: String,

    /// Whether this is the final step (no connector drawn below)
    #[serde(default)]
    pub is_last: bool,
}

impl StepIndicator {
    /// Create a step indicator.
    pub fn new(index: u32, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            index,
            title: title.into(),
            description: description.into(),
            is_last: false,
        }
    }

    /// Mark this as the last step.
    pub fn last(mut self) -> Self {
        self.is_last = true;
        self
    }
}

/// Finding counts per severity, drawn as a row of badges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeverityBadges {
    /// Critical findings
    pub critical: u32,
    /// High findings
    pub high: u32,
    /// Medium findings
    pub medium: u32,
    /// Low findings
    pub low: u32,
    /// Informational findings
    pub info: u32,
}

impl SeverityBadges {
    /// Create a badge row.
    pub fn new(critical: u32, high: u32, medium: u32, low: u32, info: u32) -> Self {
        Self {
            critical,
            high,
            medium,
            low,
            info,
        }
    }

    /// Badge labels with their counts, most severe first.
    pub fn entries(&self) -> [(&'static str, u32); 5] {
        [
            ("CRITICAL", self.critical),
            ("HIGH", self.high),
            ("MEDIUM", self.medium),
            ("LOW", self.low),
            ("INFO", self.info),
        ]
    }

    /// Total number of findings.
    pub fn total(&self) -> u32 {
        self.entries().iter().map(|(_, n)| n).sum()
    }
}

/// Cover page decoration style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoverStyle {
    /// Geometric accent shapes
    #[default]
    Geometric,
    /// Plain typographic cover
    Minimal,
}

/// Cover page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cover {
    /// Main title
    pub title: String,
    /// Subtitle line
    pub subtitle: Option<String>,
    /// Longer description, may contain line breaks
    pub description: Option<String>,
    /// Version label
    pub version: Option<String>,
    /// Author or team
    pub author: Option<String>,
    /// Distribution classification
    pub classification: Option<String>,
    /// Decoration style
    pub style: CoverStyle,
}

impl Cover {
    /// Build a cover page from document metadata.
    pub fn from_metadata(metadata: &Metadata, style: CoverStyle) -> Self {
        Self {
            title: metadata.title.clone().unwrap_or_default(),
            subtitle: metadata.subtitle.clone(),
            description: metadata.description.clone(),
            version: metadata.version.clone(),
            author: metadata.author.clone(),
            classification: metadata.classification.clone(),
            style,
        }
    }
}

/// A discrete, typed unit of document content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FlowBlock {
    /// Anchored heading title
    Heading(Heading),

    /// Horizontal accent divider
    AccentBar {
        /// Bar length in points
        width: f32,
        /// Bar thickness in points
        thickness: f32,
    },

    /// Vertical whitespace
    Spacer {
        /// Height in points
        height: f32,
    },

    /// Paragraph of inline content
    Paragraph(Paragraph),

    /// Card table
    Table(Table),

    /// Code block
    CodeBlock(CodeBlock),

    /// Callout box
    Callout(Callout),

    /// Procedure step
    StepIndicator(StepIndicator),

    /// Finding counts by severity
    SeverityBadges(SeverityBadges),

    /// Forced page break
    PageBreak,

    /// Cover page
    Cover(Cover),
}

impl FlowBlock {
    /// Short name of the variant, used in logs and statistics.
    pub fn kind(&self) -> &'static str {
        match self {
            FlowBlock::Heading(_) => "heading",
            FlowBlock::AccentBar { .. } => "accent_bar",
            FlowBlock::Spacer { .. } => "spacer",
            FlowBlock::Paragraph(_) => "paragraph",
            FlowBlock::Table(_) => "table",
            FlowBlock::CodeBlock(_) => "code_block",
            FlowBlock::Callout(_) => "callout",
            FlowBlock::StepIndicator(_) => "step_indicator",
            FlowBlock::SeverityBadges(_) => "severity_badges",
            FlowBlock::PageBreak => "page_break",
            FlowBlock::Cover(_) => "cover",
        }
    }

    /// The heading, if this block is one.
    pub fn as_heading(&self) -> Option<&Heading> {
        match self {
            FlowBlock::Heading(h) => Some(h),
            _ => None,
        }
    }

    /// Anchors this block links to.
    pub fn link_targets(&self) -> Vec<&Anchor> {
        match self {
            FlowBlock::Paragraph(p) => p.link_targets().collect(),
            _ => Vec::new(),
        }
    }

    /// Get plain text content of the block, if it carries any.
    pub fn plain_text(&self) -> Option<String> {
        match self {
            FlowBlock::Heading(h) => Some(h.text.plain_text()),
            FlowBlock::Paragraph(p) => Some(p.plain_text()),
            FlowBlock::Table(t) => Some(t.plain_text()),
            FlowBlock::CodeBlock(c) => Some(c.text.clone()),
            FlowBlock::Callout(c) => Some(format!("{}\n{}", c.title, c.text.plain_text())),
            FlowBlock::StepIndicator(s) => {
                Some(format!("{}. {}\n{}", s.index, s.title, s.description))
            }
            FlowBlock::SeverityBadges(b) => Some(
                b.entries()
                    .iter()
                    .map(|(label, n)| format!("{}: {}", label, n))
                    .collect::<Vec<_>>()
                    .join("  "),
            ),
            FlowBlock::Cover(c) => Some(c.title.clone()),
            FlowBlock::AccentBar { .. } | FlowBlock::Spacer { .. } | FlowBlock::PageBreak => None,
        }
    }
}

/// Content that bonds with a pending heading.
///
/// Only these blocks may close a heading's keep-together group; layout
/// blocks (spacers, page breaks) never do.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    /// Paragraph
    Paragraph(Paragraph),
    /// Table
    Table(Table),
    /// Code block
    CodeBlock(CodeBlock),
    /// Callout
    Callout(Callout),
    /// Step indicator
    StepIndicator(StepIndicator),
}

impl From<Content> for FlowBlock {
    fn from(content: Content) -> Self {
        match content {
            Content::Paragraph(p) => FlowBlock::Paragraph(p),
            Content::Table(t) => FlowBlock::Table(t),
            Content::CodeBlock(c) => FlowBlock::CodeBlock(c),
            Content::Callout(c) => FlowBlock::Callout(c),
            Content::StepIndicator(s) => FlowBlock::StepIndicator(s),
        }
    }
}

impl From<Paragraph> for Content {
    fn from(p: Paragraph) -> Self {
        Content::Paragraph(p)
    }
}

impl From<Table> for Content {
    fn from(t: Table) -> Self {
        Content::Table(t)
    }
}

impl From<CodeBlock> for Content {
    fn from(c: CodeBlock) -> Self {
        Content::CodeBlock(c)
    }
}

impl From<Callout> for Content {
    fn from(c: Callout) -> Self {
        Content::Callout(c)
    }
}

impl From<StepIndicator> for Content {
    fn from(s: StepIndicator) -> Self {
        Content::StepIndicator(s)
    }
}

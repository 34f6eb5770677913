//! # flowdoc
//!
//! Heading-aware document flow composition with stable section anchors.
//!
//! This library assembles long technical documents from an ordered
//! sequence of calls (headings, paragraphs, tables, callouts, code) into a
//! content stream in which every heading stays glued to its first content
//! block, and links a static table of contents to the headings through a
//! single anchor-derivation rule.
//!
//! ## Quick Start
//!
//! ```
//! use flowdoc::{render, FlowComposer, Metadata, TocEntry};
//!
//! fn main() -> flowdoc::Result<()> {
//!     let mut composer = FlowComposer::new(Metadata::with_title("Whitepaper"))?;
//!     composer.table_of_contents(&[TocEntry::new("1.", "Abstract")]);
//!     composer.section_heading("1. Abstract");
//!     composer.body("A short summary.");
//!     let doc = composer.finalize();
//!
//!     let markdown = render::to_markdown(&doc, &render::RenderOptions::default())?;
//!     assert!(markdown.contains("[Abstract](#sec_1)"));
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Keep-together groups**: headings are never stranded at a page bottom
//! - **Stable anchors**: `"2.1 The Quantum Threat"` links as `#sec_2_1`
//! - **Document scripts**: whole documents described in JSON
//! - **Multiple output formats**: Markdown, plain text, JSON
//! - **Link report**: unresolved TOC links and duplicated anchors

pub mod anchor;
pub mod compose;
pub mod error;
pub mod model;
pub mod render;
pub mod script;
pub mod toc;

// Re-export commonly used types
pub use anchor::{derive_anchor, Anchor};
pub use compose::{ComposeOptions, DecorationSpacing, FlowComposer};
pub use error::{Error, Result};
pub use model::{
    Callout, CodeBlock, ContentStream, Cover, CoverStyle, Document, FlowBlock, Heading,
    HeadingLevel, LinkReport, Markup, Metadata, PageLayout, Paragraph, ParagraphStyle, Severity,
    SeverityBadges, StepIndicator, StreamItem, Table,
};
pub use render::{JsonFormat, OutputFormat, PageBreakStyle, RenderOptions, RenderResult};
pub use script::{DocumentScript, Instruction};
pub use toc::TocEntry;

use std::path::Path;

/// Load a document script from a JSON file.
///
/// # Example
///
/// ```no_run
/// use flowdoc::load_script;
///
/// let script = load_script("whitepaper.json").unwrap();
/// println!("Instructions: {}", script.body.len());
/// ```
pub fn load_script<P: AsRef<Path>>(path: P) -> Result<DocumentScript> {
    DocumentScript::load(path)
}

/// Load a document script and compose it.
///
/// # Example
///
/// ```no_run
/// use flowdoc::compose_file;
///
/// let doc = compose_file("whitepaper.json").unwrap();
/// println!("Headings: {}", doc.headings().count());
/// ```
pub fn compose_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    load_script(path)?.compose()
}

/// Compose a document from script JSON.
pub fn compose_str(json: &str) -> Result<Document> {
    DocumentScript::from_json(json)?.compose()
}

/// Compose a script file and render it as Markdown.
///
/// # Example
///
/// ```no_run
/// use flowdoc::to_markdown;
///
/// let markdown = to_markdown("whitepaper.json").unwrap();
/// std::fs::write("whitepaper.md", markdown).unwrap();
/// ```
pub fn to_markdown<P: AsRef<Path>>(path: P) -> Result<String> {
    let doc = compose_file(path)?;
    let options = RenderOptions::default();
    render::to_markdown(&doc, &options)
}

/// Compose a script file and render it as plain text.
pub fn to_text<P: AsRef<Path>>(path: P, options: &RenderOptions) -> Result<String> {
    let doc = compose_file(path)?;
    render::to_text(&doc, options)
}

/// Compose a script file and render it as JSON.
///
/// # Example
///
/// ```no_run
/// use flowdoc::{to_json, JsonFormat};
///
/// let json = to_json("whitepaper.json", JsonFormat::Pretty).unwrap();
/// std::fs::write("whitepaper.json.out", json).unwrap();
/// ```
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let doc = compose_file(path)?;
    render::to_json(&doc, format)
}

/// Builder for composing and rendering document scripts.
///
/// # Example
///
/// ```no_run
/// use flowdoc::{Flowdoc, PageLayout};
///
/// let markdown = Flowdoc::new()
///     .with_layout(PageLayout::letter())
///     .with_frontmatter()
///     .compose("whitepaper.json")?
///     .to_markdown()?;
/// # Ok::<(), flowdoc::Error>(())
/// ```
pub struct Flowdoc {
    compose_options: ComposeOptions,
    layout_override: bool,
    render_options: RenderOptions,
}

impl Flowdoc {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            compose_options: ComposeOptions::default(),
            layout_override: false,
            render_options: RenderOptions::default(),
        }
    }

    /// Use this page layout instead of the script's.
    pub fn with_layout(mut self, layout: PageLayout) -> Self {
        self.compose_options = self.compose_options.with_layout(layout);
        self.layout_override = true;
        self
    }

    /// Set decoration spacing for a heading level.
    pub fn with_spacing(mut self, level: HeadingLevel, spacing: DecorationSpacing) -> Self {
        self.compose_options = self.compose_options.with_spacing(level, spacing);
        self
    }

    /// Enable frontmatter in output.
    pub fn with_frontmatter(mut self) -> Self {
        self.render_options = self.render_options.with_frontmatter(true);
        self
    }

    /// Set how page breaks are rendered.
    pub fn with_page_breaks(mut self, style: PageBreakStyle) -> Self {
        self.render_options = self.render_options.with_page_breaks(style);
        self
    }

    /// Mark keep-together groups in Markdown output.
    pub fn with_group_markers(mut self) -> Self {
        self.render_options = self.render_options.with_group_markers(true);
        self
    }

    /// Compose a script file.
    pub fn compose<P: AsRef<Path>>(self, path: P) -> Result<FlowdocResult> {
        let script = load_script(path)?;
        self.compose_script(&script)
    }

    /// Compose an already loaded script.
    pub fn compose_script(self, script: &DocumentScript) -> Result<FlowdocResult> {
        let mut options = self.compose_options;
        if !self.layout_override {
            if let Some(layout) = script.layout {
                options = options.with_layout(layout);
            }
        }
        let document = script.compose_with(options)?;
        Ok(FlowdocResult {
            document,
            render_options: self.render_options,
        })
    }
}

impl Default for Flowdoc {
    fn default() -> Self {
        Self::new()
    }
}

/// A composed document with its render options.
pub struct FlowdocResult {
    /// The composed document
    pub document: Document,
    /// Render options to use
    render_options: RenderOptions,
}

impl FlowdocResult {
    /// Convert to Markdown.
    pub fn to_markdown(&self) -> Result<String> {
        render::to_markdown(&self.document, &self.render_options)
    }

    /// Convert to plain text.
    pub fn to_text(&self) -> Result<String> {
        render::to_text(&self.document, &self.render_options)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Render and write to a file.
    pub fn write_to<P: AsRef<Path>>(&self, path: P, format: OutputFormat) -> Result<()> {
        render::write_to(&self.document, path, format, &self.render_options)
    }

    /// Check TOC links against heading anchors.
    pub fn link_report(&self) -> LinkReport {
        self.document.link_report()
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }
}

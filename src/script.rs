//! Document scripts.
//!
//! A script is a JSON description of a whole document: metadata, an
//! optional cover page, static TOC entries and the ordered body
//! instructions. [`DocumentScript::compose`] replays the instructions
//! through a [`FlowComposer`].
//!
//! ```
//! use flowdoc::script::DocumentScript;
//!
//! let script = DocumentScript::from_json(r#"{
//!     "metadata": {"title": "Notes"},
//!     "toc": [["1.", "Overview", false]],
//!     "body": [
//!         {"type": "heading", "level": 1, "text": "1. Overview"},
//!         {"type": "body", "text": "First paragraph."}
//!     ]
//! }"#)?;
//! let doc = script.compose()?;
//! assert!(doc.link_report().is_clean());
//! # Ok::<(), flowdoc::Error>(())
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::compose::{ComposeOptions, FlowComposer};
use crate::error::{Error, Result};
use crate::model::{
    Callout, CoverStyle, Document, HeadingLevel, Markup, Metadata, PageLayout, Severity,
    SeverityBadges, StepIndicator, Table,
};
use crate::toc::TocEntry;

/// A serialized document description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentScript {
    /// Document metadata, also used for the cover page
    pub metadata: Metadata,

    /// Page layout; A4 when absent
    pub layout: Option<PageLayout>,

    /// Cover page style; no cover when absent
    pub cover: Option<CoverStyle>,

    /// Table of contents entries; no TOC when empty
    pub toc: Vec<TocEntry>,

    /// Body instructions, in order
    pub body: Vec<Instruction>,
}

/// One composer call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Instruction {
    /// Heading at level 1-3
    Heading { level: u8, text: Markup },

    /// Body paragraph
    Body { text: Markup },

    /// Small body paragraph
    BodySmall { text: Markup },

    /// Vertical whitespace
    Spacer {
        #[serde(default = "default_spacer_height")]
        height: f32,
    },

    /// Card table
    Table(Table),

    /// Code block
    Code {
        text: String,
        #[serde(default = "default_language")]
        language: String,
    },

    /// Callout box
    Callout {
        text: Markup,
        #[serde(default)]
        severity: Severity,
        #[serde(default)]
        title: Option<String>,
    },

    /// Procedure step
    Step(StepIndicator),

    /// Finding counts by severity
    SeverityBadges(SeverityBadges),

    /// Forced page break
    PageBreak,

    /// Heading immediately followed by its first paragraph
    HeadingWithContent {
        level: u8,
        heading: Markup,
        body: Markup,
    },
}

fn default_spacer_height() -> f32 {
    12.0
}

fn default_language() -> String {
    "typescript".to_string()
}

impl DocumentScript {
    /// Parse a script from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Script(e.to_string()))
    }

    /// Load a script from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        Self::from_json(&json).map_err(|e| match e {
            Error::Script(msg) => Error::Script(format!("{}: {}", path.display(), msg)),
            other => other,
        })
    }

    /// Compose the document with default options.
    pub fn compose(&self) -> Result<Document> {
        let mut options = ComposeOptions::default();
        if let Some(layout) = self.layout {
            options = options.with_layout(layout);
        }
        self.compose_with(options)
    }

    /// Compose the document with explicit options.
    ///
    /// A layout named in the script is ignored in favour of `options`.
    pub fn compose_with(&self, options: ComposeOptions) -> Result<Document> {
        let mut composer = FlowComposer::with_options(self.metadata.clone(), options)?;

        if let Some(style) = self.cover {
            composer.cover(style);
        }
        if !self.toc.is_empty() {
            composer.table_of_contents(&self.toc);
        }

        for (i, instruction) in self.body.iter().enumerate() {
            apply(&mut composer, instruction)
                .map_err(|e| Error::Script(format!("instruction {}: {}", i + 1, e)))?;
        }

        log::debug!("composed script with {} instructions", self.body.len());
        Ok(composer.finalize())
    }
}

fn apply(composer: &mut FlowComposer, instruction: &Instruction) -> Result<()> {
    match instruction {
        Instruction::Heading { level, text } => {
            composer.heading(HeadingLevel::try_from(*level)?, text.clone());
        }
        Instruction::Body { text } => composer.body(text.clone()),
        Instruction::BodySmall { text } => composer.body_small(text.clone()),
        Instruction::Spacer { height } => composer.spacer(*height),
        Instruction::Table(table) => composer.table(table.clone()),
        Instruction::Code { text, language } => composer.code(text.clone(), language.clone()),
        Instruction::Callout {
            text,
            severity,
            title,
        } => {
            let mut callout = Callout::new(text.clone(), *severity);
            if let Some(title) = title {
                callout = callout.with_title(title.clone());
            }
            composer.callout(callout);
        }
        Instruction::Step(step) => composer.step(step.clone()),
        Instruction::SeverityBadges(badges) => composer.severity_badges(*badges),
        Instruction::PageBreak => composer.page_break(),
        Instruction::HeadingWithContent {
            level,
            heading,
            body,
        } => {
            composer.heading_with_content(
                HeadingLevel::try_from(*level)?,
                heading.clone(),
                body.clone(),
            );
        }
    }
    Ok(())
}

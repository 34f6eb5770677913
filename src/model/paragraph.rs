//! Paragraph and inline markup types.

use crate::anchor::{strip_markup, Anchor};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A pre-escaped inline markup string (`<b>`, `<i>`, `<font>` tags).
///
/// Markup is carried opaquely; renderers translate or strip tags. Use
/// [`Markup::text`] for untrusted plain text so `&`, `<` and `>` survive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Markup(String);

impl Markup {
    /// Wrap a string that is already valid markup.
    pub fn raw(markup: impl Into<String>) -> Self {
        Self(markup.into())
    }

    /// Escape plain text into markup.
    pub fn text(text: &str) -> Self {
        Self(escape(text))
    }

    /// The markup source.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Text with tags removed and entities decoded.
    pub fn plain_text(&self) -> String {
        unescape(&strip_markup(&self.0))
    }

    /// Check if the markup has no visible text.
    pub fn is_empty(&self) -> bool {
        self.plain_text().trim().is_empty()
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Markup {
    fn from(s: &str) -> Self {
        Self::raw(s)
    }
}

impl From<String> for Markup {
    fn from(s: String) -> Self {
        Self::raw(s)
    }
}

/// Escape `&`, `<` and `>` for embedding plain text in markup.
pub fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Reverse of [`escape`], plus `&quot;`.
pub fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&amp;", "&")
}

/// Bold markup around existing markup.
pub fn bold(markup: &str) -> String {
    format!("<b>{}</b>", markup)
}

/// Italic markup around existing markup.
pub fn italic(markup: &str) -> String {
    format!("<i>{}</i>", markup)
}

/// Monospace markup; the argument is plain text and gets escaped.
pub fn mono(text: &str) -> String {
    format!("<font face=\"mono\">{}</font>", escape(text))
}

/// Logical paragraph style, resolved by the renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParagraphStyle {
    /// Regular body text
    #[default]
    Body,
    /// Smaller body text
    BodySmall,
    /// Unnumbered title (e.g. "Table of Contents")
    Title,
    /// Top-level table of contents row
    TocEntry,
    /// Nested table of contents row
    TocSubEntry,
}

/// Which half of a TOC row a link is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkRole {
    /// Section number, drawn in the accent color
    Number,
    /// Section title, drawn in the primary text color
    Title,
}

/// Inline content within a paragraph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Inline {
    /// A run of markup
    Text {
        /// Markup source
        markup: Markup,
    },

    /// An internal hyperlink to a heading anchor
    Link {
        /// Link label
        label: Markup,
        /// Target anchor
        target: Anchor,
        /// Presentation role
        role: LinkRole,
    },
}

/// A paragraph of inline content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Inline pieces in order
    pub content: Vec<Inline>,

    /// Paragraph style
    pub style: ParagraphStyle,
}

impl Paragraph {
    /// Create a paragraph holding a single markup run.
    pub fn new(markup: impl Into<Markup>, style: ParagraphStyle) -> Self {
        Self {
            content: vec![Inline::Text {
                markup: markup.into(),
            }],
            style,
        }
    }

    /// Create an empty paragraph with the given style.
    pub fn empty(style: ParagraphStyle) -> Self {
        Self {
            content: Vec::new(),
            style,
        }
    }

    /// Body paragraph.
    pub fn body(markup: impl Into<Markup>) -> Self {
        Self::new(markup, ParagraphStyle::Body)
    }

    /// Small body paragraph.
    pub fn small(markup: impl Into<Markup>) -> Self {
        Self::new(markup, ParagraphStyle::BodySmall)
    }

    /// Append a markup run.
    pub fn push_text(&mut self, markup: impl Into<Markup>) {
        self.content.push(Inline::Text {
            markup: markup.into(),
        });
    }

    /// Append an internal link.
    pub fn push_link(&mut self, label: impl Into<Markup>, target: Anchor, role: LinkRole) {
        self.content.push(Inline::Link {
            label: label.into(),
            target,
            role,
        });
    }

    /// Anchors this paragraph links to.
    pub fn link_targets(&self) -> impl Iterator<Item = &Anchor> {
        self.content.iter().filter_map(|c| match c {
            Inline::Link { target, .. } => Some(target),
            Inline::Text { .. } => None,
        })
    }

    /// Get plain text content of the paragraph.
    pub fn plain_text(&self) -> String {
        self.content
            .iter()
            .map(|c| match c {
                Inline::Text { markup } => markup.plain_text(),
                Inline::Link { label, .. } => label.plain_text(),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Check if the paragraph is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty() || self.plain_text().trim().is_empty()
    }
}

//! Document model types for composed content.
//!
//! This module defines the flow blocks a document is assembled from and
//! the content stream that carries them, with keep-together groups marked,
//! to the renderer.

mod block;
mod document;
mod layout;
mod paragraph;
mod stream;
mod table;

pub use block::{
    Callout, CodeBlock, Content, Cover, CoverStyle, FlowBlock, Heading, HeadingLevel, Severity,
    SeverityBadges, StepIndicator,
};
pub use document::{Document, LinkReport, Metadata};
pub use layout::{PageLayout, DEFAULT_MARGIN};
pub use paragraph::{
    bold, escape, italic, mono, unescape, Inline, LinkRole, Markup, Paragraph, ParagraphStyle,
};
pub use stream::{ContentStream, StreamItem};
pub use table::Table;

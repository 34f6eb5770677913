//! Heading-aware composition of the content stream.
//!
//! [`FlowComposer`] turns an ordered sequence of calls (headings, body
//! text, tables, callouts, spacers) into a [`ContentStream`] in which
//! every heading is grouped with its first content block.
//!
//! [`ContentStream`]: crate::model::ContentStream

mod buffer;
mod composer;
mod options;

pub use buffer::HeadingBuffer;
pub use composer::FlowComposer;
pub use options::{ComposeOptions, DecorationSpacing};

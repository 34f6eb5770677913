//! Error types for flowdoc library.

use std::io;
use thiserror::Error;

/// Result type alias for flowdoc operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while composing or rendering a document.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The page layout leaves no usable content width.
    #[error("Invalid page layout: {0}")]
    InvalidLayout(String),

    /// Heading level outside the supported range.
    #[error("Unsupported heading level {0} (expected 1-3)")]
    InvalidHeadingLevel(u8),

    /// Table headers, rows and column widths disagree.
    #[error("Invalid table: {0}")]
    InvalidTable(String),

    /// Document script could not be read or interpreted.
    #[error("Script error: {0}")]
    Script(String),

    /// Error during rendering (Markdown, text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

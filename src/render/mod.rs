//! Rendering module for converting composed documents to output formats.

mod json;
mod markdown;
mod options;
mod output;
mod result;
mod text;

pub use json::{to_json, JsonFormat};
pub use markdown::{to_markdown, to_markdown_with_stats, MarkdownRenderer};
pub use options::{PageBreakStyle, RenderOptions};
pub use output::{render, render_with_stats, write_file, write_to, OutputFormat};
pub use result::{RenderResult, RenderStats};
pub use text::to_text;

//! Output format selection and file writing.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::model::Document;

use super::{
    to_json, to_markdown, to_markdown_with_stats, to_text, JsonFormat, RenderOptions,
    RenderResult, RenderStats,
};

/// Output format for rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Markdown format
    #[default]
    Markdown,

    /// Plain text
    Text,

    /// JSON structure
    Json,
}

impl OutputFormat {
    /// File extension without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Markdown => "md",
            OutputFormat::Text => "txt",
            OutputFormat::Json => "json",
        }
    }

    /// MIME type of the output.
    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Markdown => "text/markdown",
            OutputFormat::Text => "text/plain",
            OutputFormat::Json => "application/json",
        }
    }

    /// Guess the format from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "md" | "markdown" => Some(OutputFormat::Markdown),
            "txt" | "text" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }

    /// Guess the format from a path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}

/// Render a document in the given format.
pub fn render(doc: &Document, format: OutputFormat, options: &RenderOptions) -> Result<String> {
    match format {
        OutputFormat::Markdown => to_markdown(doc, options),
        OutputFormat::Text => to_text(doc, options),
        OutputFormat::Json => to_json(doc, JsonFormat::Pretty),
    }
}

/// Render a document in the given format, collecting statistics.
pub fn render_with_stats(
    doc: &Document,
    format: OutputFormat,
    options: &RenderOptions,
) -> Result<RenderResult> {
    if format == OutputFormat::Markdown {
        return to_markdown_with_stats(doc, options);
    }
    let content = render(doc, format, options)?;
    Ok(RenderResult::new(
        content,
        doc.metadata.clone(),
        RenderStats::collect(doc),
    ))
}

/// Render a document and write it to `path`.
///
/// The file is only created once rendering has succeeded.
pub fn write_to(
    doc: &Document,
    path: impl AsRef<Path>,
    format: OutputFormat,
    options: &RenderOptions,
) -> Result<()> {
    let path = path.as_ref();
    let content = render(doc, format, options)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, content)?;

    log::info!("wrote {} ({})", path.display(), format.mime_type());
    Ok(())
}

/// Render a document to `path`, picking the format from its extension.
pub fn write_file(doc: &Document, path: impl AsRef<Path>, options: &RenderOptions) -> Result<()> {
    let path = path.as_ref();
    let format = OutputFormat::from_path(path).ok_or_else(|| {
        Error::Render(format!(
            "cannot infer output format from {}",
            path.display()
        ))
    })?;
    write_to(doc, path, format, options)
}

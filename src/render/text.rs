//! Plain text rendering for composed documents.

use crate::error::Result;
use crate::model::{Cover, Document, FlowBlock, ParagraphStyle};

use super::{PageBreakStyle, RenderOptions};

/// Convert a document to plain text.
///
/// Blocks are separated by blank lines; consecutive TOC rows stay on
/// adjacent lines with sub-level rows indented.
pub fn to_text(doc: &Document, options: &RenderOptions) -> Result<String> {
    let mut chunks: Vec<String> = Vec::new();
    let mut in_toc = false;

    for block in doc.stream.blocks() {
        match block {
            FlowBlock::PageBreak => {
                let after_break = chunks.last().map(String::as_str) == Some("\u{c}");
                if options.page_break != PageBreakStyle::Omit && !chunks.is_empty() && !after_break {
                    chunks.push("\u{c}".to_string());
                }
                in_toc = false;
            }
            FlowBlock::Cover(cover) => {
                if options.include_cover {
                    chunks.push(cover_text(cover));
                    in_toc = false;
                }
            }
            FlowBlock::Paragraph(p)
                if matches!(
                    p.style,
                    ParagraphStyle::TocEntry | ParagraphStyle::TocSubEntry
                ) =>
            {
                let indent = if p.style == ParagraphStyle::TocSubEntry {
                    "    "
                } else {
                    ""
                };
                let row = format!("{}{}", indent, p.plain_text());
                match chunks.last_mut() {
                    Some(last) if in_toc => {
                        last.push('\n');
                        last.push_str(&row);
                    }
                    _ => chunks.push(row),
                }
                in_toc = true;
            }
            other => {
                if let Some(text) = other.plain_text() {
                    if !text.trim().is_empty() {
                        chunks.push(text.trim_end().to_string());
                        in_toc = false;
                    }
                }
            }
        }
    }

    // A trailing page break carries no content.
    while chunks.last().map(String::as_str) == Some("\u{c}") {
        chunks.pop();
    }

    Ok(chunks.join("\n\n"))
}

/// Title and subtitle, then the description, then the detail line.
fn cover_text(cover: &Cover) -> String {
    let mut sections = Vec::new();

    let mut heading = cover.title.clone();
    if let Some(ref subtitle) = cover.subtitle {
        heading.push('\n');
        heading.push_str(subtitle);
    }
    sections.push(heading);

    if let Some(ref description) = cover.description {
        sections.push(description.trim_end().to_string());
    }

    let details: Vec<&str> = [&cover.version, &cover.author, &cover.classification]
        .into_iter()
        .flatten()
        .map(String::as_str)
        .collect();
    if !details.is_empty() {
        sections.push(details.join(" · "));
    }

    sections.join("\n\n")
}

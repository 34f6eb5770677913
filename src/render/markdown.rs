//! Markdown rendering for composed documents.

use crate::error::Result;
use crate::model::{
    Callout, CodeBlock, Cover, Document, FlowBlock, Heading, Inline, Paragraph, ParagraphStyle,
    SeverityBadges, StepIndicator, StreamItem, Table,
};
use regex::Regex;
use std::sync::OnceLock;

use super::{PageBreakStyle, RenderOptions, RenderResult, RenderStats};

/// Convert a document to Markdown.
pub fn to_markdown(doc: &Document, options: &RenderOptions) -> Result<String> {
    let renderer = MarkdownRenderer::new(options.clone());
    renderer.render(doc)
}

/// Convert a document to Markdown with statistics.
pub fn to_markdown_with_stats(doc: &Document, options: &RenderOptions) -> Result<RenderResult> {
    let mut options = options.clone();
    options.collect_stats = true;
    let renderer = MarkdownRenderer::new(options);
    renderer.render_with_stats(doc)
}

/// Markdown renderer.
///
/// Headings carry their anchor as an inline `<a id>` element so that TOC
/// links (`[2.1](#sec_2_1)`) resolve in any HTML-producing viewer.
pub struct MarkdownRenderer {
    options: RenderOptions,
    stats: RenderStats,
    has_content: bool,
    after_break: bool,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            stats: RenderStats::new(),
            has_content: false,
            after_break: false,
        }
    }

    /// Render a document to Markdown.
    pub fn render(mut self, doc: &Document) -> Result<String> {
        self.render_internal(doc)
    }

    /// Render a document to Markdown with statistics.
    pub fn render_with_stats(mut self, doc: &Document) -> Result<RenderResult> {
        self.options.collect_stats = true;
        let content = self.render_internal(doc)?;

        self.stats.count_text(&doc.plain_text());

        Ok(RenderResult::new(content, doc.metadata.clone(), self.stats))
    }

    fn render_internal(&mut self, doc: &Document) -> Result<String> {
        let mut output = String::new();

        if self.options.include_frontmatter {
            output.push_str(&doc.metadata.to_yaml_frontmatter());
            output.push('\n');
        }

        for item in doc.stream.items() {
            match item {
                StreamItem::Block(block) => self.render_block(&mut output, block),
                StreamItem::KeepTogether(blocks) => {
                    if self.options.collect_stats {
                        self.stats.add_group();
                    }
                    if self.options.mark_groups {
                        ensure_blank_line(&mut output);
                        output.push_str("<!-- keep-together -->\n\n");
                    }
                    for block in blocks {
                        self.render_block(&mut output, block);
                    }
                    if self.options.mark_groups {
                        ensure_blank_line(&mut output);
                        output.push_str("<!-- /keep-together -->\n\n");
                    }
                }
            }
        }

        let mut output = output.trim().to_string();
        output.push('\n');
        Ok(output)
    }

    fn render_block(&mut self, output: &mut String, block: &FlowBlock) {
        if self.options.collect_stats {
            self.stats.add_block(block);
        }

        match block {
            // Layout-only blocks have no Markdown counterpart.
            FlowBlock::AccentBar { .. } | FlowBlock::Spacer { .. } => return,
            FlowBlock::PageBreak => {
                self.render_page_break(output);
                return;
            }
            FlowBlock::Paragraph(p) if is_toc_row(p) => {
                self.render_toc_row(output, p);
                self.has_content = true;
                self.after_break = false;
                return;
            }
            _ => {}
        }

        ensure_blank_line(output);
        let start = output.len();
        match block {
            FlowBlock::Heading(h) => self.render_heading(output, h),
            FlowBlock::Paragraph(p) => self.render_paragraph(output, p),
            FlowBlock::Table(t) => self.render_table(output, t),
            FlowBlock::CodeBlock(c) => render_code(output, c),
            FlowBlock::Callout(c) => self.render_callout(output, c),
            FlowBlock::StepIndicator(s) => self.render_step(output, s),
            FlowBlock::SeverityBadges(b) => render_badges(output, b),
            FlowBlock::Cover(c) => {
                if self.options.include_cover {
                    self.render_cover(output, c);
                }
            }
            FlowBlock::AccentBar { .. } | FlowBlock::Spacer { .. } | FlowBlock::PageBreak => {}
        }
        if output.len() > start {
            self.has_content = true;
            self.after_break = false;
        }
    }

    fn render_page_break(&mut self, output: &mut String) {
        // Leading and repeated breaks would only produce stray rules.
        // Frontmatter does not count as content.
        if !self.has_content || self.after_break {
            return;
        }
        match self.options.page_break {
            PageBreakStyle::Rule => {
                ensure_blank_line(output);
                output.push_str("---\n\n");
            }
            PageBreakStyle::Html => {
                ensure_blank_line(output);
                output.push_str("<div style=\"page-break-after: always;\"></div>\n\n");
            }
            PageBreakStyle::Omit => {}
        }
        self.after_break = true;
    }

    fn render_heading(&self, output: &mut String, heading: &Heading) {
        output.push_str(&"#".repeat(heading.level.as_u8() as usize));
        output.push_str(&format!(" <a id=\"{}\"></a>", heading.anchor));
        output.push_str(&self.markup(heading.text.as_str()));
        output.push_str("\n\n");
    }

    fn render_paragraph(&self, output: &mut String, para: &Paragraph) {
        if para.is_empty() {
            return;
        }
        if para.style == ParagraphStyle::Title {
            output.push_str("# ");
        }
        output.push_str(&self.inline(&para.content));
        output.push_str("\n\n");
    }

    fn render_toc_row(&self, output: &mut String, para: &Paragraph) {
        if para.style == ParagraphStyle::TocSubEntry {
            output.push_str("  ");
        }
        output.push_str("- ");
        output.push_str(&self.inline(&para.content));
        output.push('\n');
    }

    fn inline(&self, content: &[Inline]) -> String {
        content
            .iter()
            .map(|item| match item {
                Inline::Text { markup } => self.markup(markup.as_str()),
                Inline::Link { label, target, .. } => {
                    format!("[{}]({})", self.markup(label.as_str()), target.href())
                }
            })
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn render_table(&self, output: &mut String, table: &Table) {
        output.push('|');
        for header in &table.headers {
            output.push_str(&format!(" {} |", self.cell(header.as_str())));
        }
        output.push('\n');

        output.push('|');
        for _ in &table.headers {
            output.push_str(" --- |");
        }
        output.push('\n');

        for row in &table.rows {
            output.push('|');
            for (col, cell) in row.iter().enumerate() {
                let content = self.cell(cell.as_str());
                if table.is_highlighted(col) && !content.is_empty() {
                    output.push_str(&format!(" **{}** |", content));
                } else {
                    output.push_str(&format!(" {} |", content));
                }
            }
            output.push('\n');
        }

        output.push('\n');
    }

    fn cell(&self, markup: &str) -> String {
        let content = self.markup(markup).replace('\n', " ");
        let content = if self.options.escape_special_chars {
            content
        } else {
            content.replace('|', "\\|")
        };
        content.trim().to_string()
    }

    fn render_callout(&self, output: &mut String, callout: &Callout) {
        output.push_str(&format!("> **{}**\n>\n", self.text(&callout.title)));
        for line in self.markup(callout.text.as_str()).lines() {
            if line.trim().is_empty() {
                output.push_str(">\n");
            } else {
                output.push_str("> ");
                output.push_str(line);
                output.push('\n');
            }
        }
        output.push('\n');
    }

    fn render_step(&self, output: &mut String, step: &StepIndicator) {
        output.push_str(&format!("**{}. {}**", step.index, self.text(&step.title)));
        if !step.description.trim().is_empty() {
            output.push_str("  \n");
            output.push_str(&self.text(&step.description));
        }
        output.push_str("\n\n");
    }

    fn render_cover(&self, output: &mut String, cover: &Cover) {
        output.push_str(&format!("# {}\n\n", self.text(&cover.title)));

        if let Some(ref subtitle) = cover.subtitle {
            output.push_str(&format!("**{}**\n\n", self.text(subtitle)));
        }
        if let Some(ref description) = cover.description {
            let lines: Vec<String> = description.lines().map(|l| self.text(l)).collect();
            output.push_str(&lines.join("  \n"));
            output.push_str("\n\n");
        }

        let details: Vec<String> = [&cover.version, &cover.author, &cover.classification]
            .into_iter()
            .flatten()
            .map(|s| self.text(s))
            .collect();
        if !details.is_empty() {
            output.push_str(&format!("*{}*\n\n", details.join(" · ")));
        }
    }

    fn markup(&self, markup: &str) -> String {
        markup_to_markdown(markup, self.options.escape_special_chars)
    }

    fn text(&self, text: &str) -> String {
        if self.options.escape_special_chars {
            escape_markdown(text)
        } else {
            text.to_string()
        }
    }
}

fn is_toc_row(para: &Paragraph) -> bool {
    matches!(
        para.style,
        ParagraphStyle::TocEntry | ParagraphStyle::TocSubEntry
    )
}

fn render_code(output: &mut String, code: &CodeBlock) {
    // The fence must be longer than any backtick run inside the code.
    let longest = code
        .text
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    let fence = "`".repeat(longest.max(2) + 1);

    output.push_str(&fence);
    output.push_str(code.language.trim());
    output.push('\n');
    output.push_str(code.text.trim_end_matches('\n'));
    output.push('\n');
    output.push_str(&fence);
    output.push_str("\n\n");
}

fn render_badges(output: &mut String, badges: &SeverityBadges) {
    let row: Vec<String> = badges
        .entries()
        .iter()
        .map(|(label, count)| format!("**{}** {}", label, count))
        .collect();
    output.push_str(&row.join(" · "));
    output.push_str("\n\n");
}

fn ensure_blank_line(output: &mut String) {
    if output.is_empty() || output.ends_with("\n\n") {
        return;
    }
    if output.ends_with('\n') {
        output.push('\n');
    } else {
        output.push_str("\n\n");
    }
}

fn tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]+>").unwrap())
}

/// Translate inline markup tags into Markdown.
///
/// Bold and italic map to `**`/`*`, monospace fonts to backticks, `<br/>`
/// to a hard line break. Anchor and other presentational tags are dropped.
fn markup_to_markdown(markup: &str, escape: bool) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut fonts: Vec<bool> = Vec::new();
    let mut last = 0;

    for tag in tag_regex().find_iter(markup) {
        let in_code = fonts.iter().any(|mono| *mono);
        push_text(&mut out, &markup[last..tag.start()], escape && !in_code);
        last = tag.end();

        let inner = tag.as_str().trim_start_matches('<').trim_end_matches('>').trim();
        let closing = inner.starts_with('/');
        let name = inner
            .trim_start_matches('/')
            .split(|c: char| c.is_whitespace() || c == '/')
            .next()
            .unwrap_or("")
            .to_ascii_lowercase();

        match name.as_str() {
            "b" | "strong" => out.push_str("**"),
            "i" | "em" => out.push_str("*"),
            "font" if closing => {
                if fonts.pop().unwrap_or(false) {
                    out.push('`');
                }
            }
            "font" => {
                let mono = inner.to_ascii_lowercase().contains("mono");
                if mono {
                    out.push('`');
                }
                fonts.push(mono);
            }
            "br" => out.push_str("  \n"),
            "sup" | "sub" | "u" => {
                out.push('<');
                if closing {
                    out.push('/');
                }
                out.push_str(&name);
                out.push('>');
            }
            _ => {}
        }
    }

    let in_code = fonts.iter().any(|mono| *mono);
    push_text(&mut out, &markup[last..], escape && !in_code);
    out
}

fn push_text(out: &mut String, text: &str, escape: bool) {
    let text = crate::model::unescape(text);
    if escape {
        out.push_str(&escape_markdown(&text));
    } else {
        out.push_str(&text);
    }
}

/// Escape special Markdown characters.
/// Only escape characters that could be misinterpreted as Markdown syntax.
fn escape_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            // Core formatting that must be escaped
            '\\' | '`' | '*' | '_' |
            // Brackets for links, pipe for tables
            '[' | ']' | '|' => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Metadata, Severity};
    use crate::toc::TocEntry;
    use crate::FlowComposer;

    fn render(build: impl FnOnce(&mut FlowComposer)) -> String {
        let mut composer = FlowComposer::new(Metadata::with_title("Doc")).unwrap();
        build(&mut composer);
        to_markdown(&composer.finalize(), &RenderOptions::default()).unwrap()
    }

    #[test]
    fn test_escape_markdown() {
        assert_eq!(escape_markdown("Hello *world*"), "Hello \\*world\\*");
        assert_eq!(escape_markdown("[link]"), "\\[link\\]");
    }

    #[test]
    fn test_markup_translation() {
        assert_eq!(
            markup_to_markdown("a <b>bold</b> and <i>it</i>", true),
            "a **bold** and *it*"
        );
        assert_eq!(
            markup_to_markdown("<font face=\"mono\">x_y</font> z_w", true),
            "`x_y` z\\_w"
        );
        assert_eq!(markup_to_markdown("a &lt; b &amp; c", false), "a < b & c");
        assert_eq!(markup_to_markdown("<a name=\"x\"/>Title", true), "Title");
    }

    #[test]
    fn test_render_heading_with_anchor() {
        let md = render(|c| {
            c.sub_heading("2.1 The Quantum Threat");
            c.body("Shor's algorithm.");
        });
        assert!(md.contains("## <a id=\"sec_2_1\"></a>2.1 The Quantum Threat\n\nShor's algorithm."));
    }

    #[test]
    fn test_render_toc_links() {
        let md = render(|c| {
            c.table_of_contents(&[
                TocEntry::new("2.", "Introduction"),
                TocEntry::sub("2.1", "The Quantum Threat"),
            ]);
        });
        assert!(md.starts_with("# Table of Contents\n\n- [2.](#sec_2) [Introduction](#sec_2)\n"));
        assert!(md.contains("\n  - [2.1](#sec_2_1) [The Quantum Threat](#sec_2_1)\n"));
    }

    #[test]
    fn test_leading_and_repeated_breaks_dropped() {
        let md = render(|c| {
            c.page_break();
            c.body("one");
            c.page_break();
            c.section_heading("2. Two");
            c.body("two");
        });
        assert!(md.starts_with("one"));
        assert_eq!(md.matches("---").count(), 1);
    }

    #[test]
    fn test_leading_break_after_frontmatter_dropped() {
        let mut composer = FlowComposer::new(Metadata::with_title("T")).unwrap();
        composer.section_heading("1. One");
        composer.body("x");
        let doc = composer.finalize();

        let md = to_markdown(&doc, &RenderOptions::new().with_frontmatter(true)).unwrap();
        assert_eq!(md, "---\ntitle: \"T\"\n---\n\n# <a id=\"sec_1\"></a>1. One\n\nx\n");
    }

    #[test]
    fn test_skipped_cover_is_not_content() {
        let mut composer = FlowComposer::new(Metadata::with_title("T")).unwrap();
        composer.cover(crate::model::CoverStyle::Minimal);
        composer.section_heading("1. One");
        composer.body("x");
        let doc = composer.finalize();

        let md = to_markdown(&doc, &RenderOptions::new().with_cover(false)).unwrap();
        assert!(md.starts_with("# <a id=\"sec_1\"></a>1. One"));
    }

    #[test]
    fn test_render_severity_badges() {
        let md = render(|c| c.severity_badges(SeverityBadges::new(2, 2, 1, 0, 0)));
        assert_eq!(
            md,
            "**CRITICAL** 2 · **HIGH** 2 · **MEDIUM** 1 · **LOW** 0 · **INFO** 0\n"
        );
    }

    #[test]
    fn test_escaping_disabled() {
        let mut composer = FlowComposer::new(Metadata::default()).unwrap();
        composer.body("snake_case and a|b");
        let doc = composer.finalize();

        let escaped = to_markdown(&doc, &RenderOptions::default()).unwrap();
        assert_eq!(escaped, "snake\\_case and a\\|b\n");

        let raw = to_markdown(&doc, &RenderOptions::new().with_escaping(false)).unwrap();
        assert_eq!(raw, "snake_case and a|b\n");
    }

    #[test]
    fn test_render_code_fence() {
        let md = render(|c| c.code("let s = \"```\";", "rust"));
        assert!(md.starts_with("````rust\nlet s = \"```\";\n````"));
    }

    #[test]
    fn test_render_callout_and_table() {
        let md = render(|c| {
            c.callout(Callout::new("Line one\nLine two", Severity::Warning));
            c.table(
                Table::new(["Level", "Size"], vec![vec!["44", "2420"]], vec![0.5, 0.5])
                    .unwrap()
                    .with_highlight_columns(vec![1])
                    .unwrap(),
            );
        });
        assert!(md.contains("> **WARNING**\n>\n> Line one\n> Line two\n"));
        assert!(md.contains("| Level | Size |\n| --- | --- |\n| 44 | **2420** |\n"));
    }

    #[test]
    fn test_group_markers() {
        let mut composer = FlowComposer::new(Metadata::default()).unwrap();
        composer.sub_heading("1.1 A");
        composer.body("B");
        let doc = composer.finalize();

        let md = to_markdown(&doc, &RenderOptions::new().with_group_markers(true)).unwrap();
        assert!(md.starts_with("<!-- keep-together -->\n\n## "));
        assert!(md.ends_with("B\n\n<!-- /keep-together -->\n"));
    }

    #[test]
    fn test_stats() {
        let mut composer = FlowComposer::new(Metadata::default()).unwrap();
        composer.section_heading("1. Abstract");
        composer.body("Hello world");
        composer.info_box("Note");
        let doc = composer.finalize();

        let result = to_markdown_with_stats(&doc, &RenderOptions::default()).unwrap();
        assert_eq!(result.stats.heading_count, 1);
        assert_eq!(result.stats.paragraph_count, 1);
        assert_eq!(result.stats.callout_count, 1);
        assert_eq!(result.stats.group_count, 1);
        assert_eq!(result.stats.page_break_count, 1);
    }
}

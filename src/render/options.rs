//! Rendering options and configuration.

/// Options for rendering a composed document.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Include YAML frontmatter with metadata
    pub include_frontmatter: bool,

    /// Render the cover page, if the stream has one
    pub include_cover: bool,

    /// Wrap keep-together groups in HTML comments
    pub mark_groups: bool,

    /// How page breaks appear in the output
    pub page_break: PageBreakStyle,

    /// Escape special Markdown characters in text
    pub escape_special_chars: bool,

    /// Collect statistics during rendering
    pub collect_stats: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable frontmatter.
    pub fn with_frontmatter(mut self, include: bool) -> Self {
        self.include_frontmatter = include;
        self
    }

    /// Enable or disable the cover page.
    pub fn with_cover(mut self, include: bool) -> Self {
        self.include_cover = include;
        self
    }

    /// Enable or disable keep-together markers.
    pub fn with_group_markers(mut self, mark: bool) -> Self {
        self.mark_groups = mark;
        self
    }

    /// Set the page break style.
    pub fn with_page_breaks(mut self, style: PageBreakStyle) -> Self {
        self.page_break = style;
        self
    }

    /// Enable or disable Markdown escaping.
    pub fn with_escaping(mut self, escape: bool) -> Self {
        self.escape_special_chars = escape;
        self
    }

    /// Enable statistics collection during rendering.
    pub fn with_stats(mut self, collect: bool) -> Self {
        self.collect_stats = collect;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            include_frontmatter: false,
            include_cover: true,
            mark_groups: false,
            page_break: PageBreakStyle::Rule,
            escape_special_chars: true,
            collect_stats: false,
        }
    }
}

/// Page break representation in text output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageBreakStyle {
    /// Horizontal rule (`---`)
    #[default]
    Rule,
    /// HTML element with a CSS page break
    Html,
    /// Drop page breaks
    Omit,
}

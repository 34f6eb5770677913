//! Composition options and configuration.

use crate::model::{HeadingLevel, PageLayout};

/// Whitespace placed around a heading title, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecorationSpacing {
    /// Spacer before the title (0 = none)
    pub before: f32,
    /// Spacer after the title (0 = none)
    pub after: f32,
}

impl DecorationSpacing {
    /// Create a spacing pair.
    pub const fn new(before: f32, after: f32) -> Self {
        Self { before, after }
    }
}

/// Options controlling how headings are decorated and where content lands.
#[derive(Debug, Clone)]
pub struct ComposeOptions {
    /// Page geometry
    pub layout: PageLayout,

    /// Spacing around level-1 titles
    pub section_spacing: DecorationSpacing,

    /// Spacing around level-2 titles
    pub subsection_spacing: DecorationSpacing,

    /// Spacing around level-3 titles
    pub subsubsection_spacing: DecorationSpacing,

    /// Thickness of the accent bar under level-1 titles
    pub accent_bar_thickness: f32,

    /// Title of the generated table of contents
    pub toc_title: String,

    /// Spacer between the table of contents header and its rows
    pub toc_spacing: f32,
}

impl ComposeOptions {
    /// Create new compose options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page layout.
    pub fn with_layout(mut self, layout: PageLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Set the spacing for one heading level.
    pub fn with_spacing(mut self, level: HeadingLevel, spacing: DecorationSpacing) -> Self {
        match level {
            HeadingLevel::Section => self.section_spacing = spacing,
            HeadingLevel::Subsection => self.subsection_spacing = spacing,
            HeadingLevel::Subsubsection => self.subsubsection_spacing = spacing,
        }
        self
    }

    /// Set the accent bar thickness.
    pub fn with_accent_bar_thickness(mut self, thickness: f32) -> Self {
        self.accent_bar_thickness = thickness;
        self
    }

    /// Set the table of contents title.
    pub fn with_toc_title(mut self, title: impl Into<String>) -> Self {
        self.toc_title = title.into();
        self
    }

    /// Spacing for a heading level.
    pub fn spacing(&self, level: HeadingLevel) -> DecorationSpacing {
        match level {
            HeadingLevel::Section => self.section_spacing,
            HeadingLevel::Subsection => self.subsection_spacing,
            HeadingLevel::Subsubsection => self.subsubsection_spacing,
        }
    }
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self {
            layout: PageLayout::default(),
            section_spacing: DecorationSpacing::new(0.0, 12.0),
            subsection_spacing: DecorationSpacing::new(16.0, 6.0),
            subsubsection_spacing: DecorationSpacing::new(12.0, 4.0),
            accent_bar_thickness: 1.0,
            toc_title: "Table of Contents".to_string(),
            toc_spacing: 16.0,
        }
    }
}

//! Page geometry.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Default page margin in points (roughly 20mm).
pub const DEFAULT_MARGIN: f32 = 56.0;

/// Page size and margins, in points (1 point = 1/72 inch).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageLayout {
    /// Page width
    pub width: f32,
    /// Page height
    pub height: f32,
    /// Left margin
    pub margin_left: f32,
    /// Right margin
    pub margin_right: f32,
    /// Top margin
    pub margin_top: f32,
    /// Bottom margin
    pub margin_bottom: f32,
}

impl PageLayout {
    /// Create a layout with uniform default margins.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            margin_left: DEFAULT_MARGIN,
            margin_right: DEFAULT_MARGIN,
            margin_top: DEFAULT_MARGIN,
            margin_bottom: DEFAULT_MARGIN,
        }
    }

    /// A4 (210 x 297 mm).
    pub fn a4() -> Self {
        Self::new(595.0, 842.0) // 210mm * 2.834, 297mm * 2.834
    }

    /// US Letter (8.5 x 11 inches).
    pub fn letter() -> Self {
        Self::new(612.0, 792.0) // 8.5 * 72, 11 * 72
    }

    /// Set horizontal margins.
    pub fn with_horizontal_margins(mut self, left: f32, right: f32) -> Self {
        self.margin_left = left;
        self.margin_right = right;
        self
    }

    /// Set vertical margins.
    pub fn with_vertical_margins(mut self, top: f32, bottom: f32) -> Self {
        self.margin_top = top;
        self.margin_bottom = bottom;
        self
    }

    /// Usable width between the horizontal margins.
    pub fn content_width(&self) -> f32 {
        self.width - self.margin_left - self.margin_right
    }

    /// Usable height between the vertical margins.
    pub fn content_height(&self) -> f32 {
        self.height - self.margin_top - self.margin_bottom
    }

    /// Check that the layout leaves a usable content area.
    pub fn validate(&self) -> Result<()> {
        let (w, h) = (self.content_width(), self.content_height());
        if !w.is_finite() || w <= 0.0 {
            return Err(Error::InvalidLayout(format!(
                "content width {} is not positive",
                w
            )));
        }
        if !h.is_finite() || h <= 0.0 {
            return Err(Error::InvalidLayout(format!(
                "content height {} is not positive",
                h
            )));
        }
        Ok(())
    }
}

impl Default for PageLayout {
    fn default() -> Self {
        Self::a4()
    }
}

//! Table types.

use super::Markup;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Tolerance when checking that column fractions fit the content width.
const WIDTH_EPSILON: f32 = 1e-3;

/// A card-style table with a header row.
///
/// Column widths are fractions of the content width. The shape is checked
/// on construction (and on deserialization), so every row has exactly one
/// cell per header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTable")]
pub struct Table {
    /// Header cells
    pub headers: Vec<Markup>,

    /// Body rows
    pub rows: Vec<Vec<Markup>>,

    /// Column widths as fractions of the content width
    pub column_widths: Vec<f32>,

    /// Zero-based indices of emphasized columns
    pub highlight_columns: Vec<usize>,
}

#[derive(Deserialize)]
struct RawTable {
    headers: Vec<Markup>,
    rows: Vec<Vec<Markup>>,
    column_widths: Vec<f32>,
    #[serde(default)]
    highlight_columns: Vec<usize>,
}

impl TryFrom<RawTable> for Table {
    type Error = Error;

    fn try_from(raw: RawTable) -> Result<Self> {
        Table::new(raw.headers, raw.rows, raw.column_widths)?
            .with_highlight_columns(raw.highlight_columns)
    }
}

impl Table {
    /// Create a table, validating its shape.
    pub fn new<H, R>(headers: H, rows: R, column_widths: Vec<f32>) -> Result<Self>
    where
        H: IntoIterator,
        H::Item: Into<Markup>,
        R: IntoIterator,
        R::Item: IntoIterator,
        <R::Item as IntoIterator>::Item: Into<Markup>,
    {
        let headers: Vec<Markup> = headers.into_iter().map(Into::into).collect();
        let rows: Vec<Vec<Markup>> = rows
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();

        if headers.is_empty() {
            return Err(Error::InvalidTable("table has no header cells".to_string()));
        }
        if column_widths.len() != headers.len() {
            return Err(Error::InvalidTable(format!(
                "{} headers but {} column widths",
                headers.len(),
                column_widths.len()
            )));
        }
        if let Some(w) = column_widths.iter().find(|w| !w.is_finite() || **w <= 0.0) {
            return Err(Error::InvalidTable(format!("invalid column width {}", w)));
        }
        let total: f32 = column_widths.iter().sum();
        if total > 1.0 + WIDTH_EPSILON {
            return Err(Error::InvalidTable(format!(
                "column widths sum to {:.3}, exceeding the content width",
                total
            )));
        }
        if let Some((i, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != headers.len())
        {
            return Err(Error::InvalidTable(format!(
                "row {} has {} cells, expected {}",
                i,
                row.len(),
                headers.len()
            )));
        }

        Ok(Self {
            headers,
            rows,
            column_widths,
            highlight_columns: Vec::new(),
        })
    }

    /// Mark columns for emphasis.
    pub fn with_highlight_columns(mut self, columns: Vec<usize>) -> Result<Self> {
        if let Some(c) = columns.iter().find(|c| **c >= self.column_count()) {
            return Err(Error::InvalidTable(format!(
                "highlight column {} out of range ({} columns)",
                c,
                self.column_count()
            )));
        }
        self.highlight_columns = columns;
        Ok(self)
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Get the number of body rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check if a column is highlighted.
    pub fn is_highlighted(&self, column: usize) -> bool {
        self.highlight_columns.contains(&column)
    }

    /// Column widths in points for a given content width.
    pub fn absolute_widths(&self, content_width: f32) -> Vec<f32> {
        self.column_widths
            .iter()
            .map(|w| w * content_width)
            .collect()
    }

    /// Get plain text representation of the table.
    pub fn plain_text(&self) -> String {
        std::iter::once(&self.headers)
            .chain(self.rows.iter())
            .map(|row| {
                row.iter()
                    .map(|c| c.plain_text())
                    .collect::<Vec<_>>()
                    .join("\t")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

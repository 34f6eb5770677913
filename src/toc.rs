//! Table of contents links.
//!
//! TOC rows are built from static entries before the body exists. Each row
//! links to the anchor its heading will derive, computed through the same
//! numbering normalization as [`derive_anchor`](crate::anchor::derive_anchor).

use crate::anchor::{anchor_for_number, Anchor};
use crate::model::{Document, LinkRole, Markup, Paragraph, ParagraphStyle};
use serde::{Deserialize, Serialize};

/// A static table of contents entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawTocEntry")]
pub struct TocEntry {
    /// Section number as printed (`"2."`, `"2.1"`, `"A."`)
    pub number: String,

    /// Section title
    pub title: String,

    /// Whether this entry is indented under a top-level section
    pub is_sub_level: bool,
}

/// Accepts both `["2.1", "Title", true]` and the field form.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawTocEntry {
    Row(String, String, bool),
    ShortRow(String, String),
    Fields {
        number: String,
        title: String,
        #[serde(default)]
        is_sub_level: bool,
    },
}

impl From<RawTocEntry> for TocEntry {
    fn from(raw: RawTocEntry) -> Self {
        match raw {
            RawTocEntry::Row(number, title, is_sub_level) => Self {
                number,
                title,
                is_sub_level,
            },
            RawTocEntry::ShortRow(number, title) => Self::new(number, title),
            RawTocEntry::Fields {
                number,
                title,
                is_sub_level,
            } => Self {
                number,
                title,
                is_sub_level,
            },
        }
    }
}

impl TocEntry {
    /// Top-level entry.
    pub fn new(number: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            title: title.into(),
            is_sub_level: false,
        }
    }

    /// Nested entry.
    pub fn sub(number: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            is_sub_level: true,
            ..Self::new(number, title)
        }
    }

    /// Anchor the entry links to.
    pub fn anchor(&self) -> Anchor {
        anchor_for_number(&self.number)
    }

    /// Row style.
    pub fn style(&self) -> ParagraphStyle {
        if self.is_sub_level {
            ParagraphStyle::TocSubEntry
        } else {
            ParagraphStyle::TocEntry
        }
    }
}

/// Link paragraph for one entry: the number and the title, both pointing
/// at the entry's anchor.
pub fn link_row(entry: &TocEntry) -> Paragraph {
    let anchor = entry.anchor();
    let mut row = Paragraph::empty(entry.style());
    row.push_link(Markup::text(&entry.number), anchor.clone(), LinkRole::Number);
    row.push_link(Markup::text(&entry.title), anchor, LinkRole::Title);
    row
}

/// Link paragraphs for all entries, in order.
pub fn link_rows(entries: &[TocEntry]) -> Vec<Paragraph> {
    entries.iter().map(link_row).collect()
}

/// Entries whose anchor matches no heading in `doc`.
pub fn unresolved_entries<'a>(entries: &'a [TocEntry], doc: &Document) -> Vec<&'a TocEntry> {
    entries
        .iter()
        .filter(|entry| doc.resolve(&entry.anchor()).is_none())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Inline;

    #[test]
    fn test_link_row() {
        let row = link_row(&TocEntry::sub("2.1", "The Quantum Threat"));
        assert_eq!(row.style, ParagraphStyle::TocSubEntry);

        let targets: Vec<_> = row.link_targets().map(Anchor::as_str).collect();
        assert_eq!(targets, vec!["sec_2_1", "sec_2_1"]);

        match &row.content[0] {
            Inline::Link { label, role, .. } => {
                assert_eq!(label.as_str(), "2.1");
                assert_eq!(*role, LinkRole::Number);
            }
            other => panic!("expected link, got {:?}", other),
        }
    }

    #[test]
    fn test_appendix_entries() {
        assert_eq!(
            TocEntry::new("A.", "Notation Reference").anchor().as_str(),
            "sec_Appendix_A"
        );
        assert_eq!(
            TocEntry::new("B.", "Test Coverage").anchor().as_str(),
            "sec_Appendix_B"
        );
    }

    #[test]
    fn test_title_is_escaped() {
        let row = link_row(&TocEntry::new("4.", "Q&A <draft>"));
        assert_eq!(row.plain_text(), "4. Q&A <draft>");
    }

    #[test]
    fn test_deserialize_forms() {
        let entries: Vec<TocEntry> = serde_json::from_str(
            r#"[["1.", "Abstract", false], ["2.1", "Threat", true], ["3.", "Short"],
                {"number": "A.", "title": "Notation"}]"#,
        )
        .unwrap();

        assert_eq!(entries[0], TocEntry::new("1.", "Abstract"));
        assert_eq!(entries[1], TocEntry::sub("2.1", "Threat"));
        assert_eq!(entries[2], TocEntry::new("3.", "Short"));
        assert_eq!(entries[3], TocEntry::new("A.", "Notation"));
    }
}

//! Document-level types.

use super::{ContentStream, Heading, PageLayout};
use crate::anchor::Anchor;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A finished, composed document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Document metadata (title, author, etc.)
    pub metadata: Metadata,

    /// Page geometry the stream was composed against
    pub layout: PageLayout,

    /// Composed content
    pub stream: ContentStream,
}

impl Document {
    /// Create an empty document.
    pub fn new(metadata: Metadata, layout: PageLayout) -> Self {
        Self {
            metadata,
            layout,
            stream: ContentStream::new(),
        }
    }

    /// Check if the document has no content.
    pub fn is_empty(&self) -> bool {
        self.stream.is_empty()
    }

    /// Headings in document order.
    pub fn headings(&self) -> impl Iterator<Item = &Heading> {
        self.stream.headings()
    }

    /// Anchors of all headings, in document order.
    pub fn anchors(&self) -> Vec<&Anchor> {
        self.headings().map(|h| &h.anchor).collect()
    }

    /// Find the heading an anchor points at.
    pub fn resolve(&self, anchor: &Anchor) -> Option<&Heading> {
        self.headings().find(|h| &h.anchor == anchor)
    }

    /// Every internal link target, in document order (duplicates kept).
    pub fn link_targets(&self) -> Vec<&Anchor> {
        self.stream
            .blocks()
            .flat_map(|block| block.link_targets())
            .collect()
    }

    /// Check links against heading anchors.
    ///
    /// Generation never fails on these problems; this is a diagnostic for
    /// callers that want to verify the output.
    pub fn link_report(&self) -> LinkReport {
        let mut counts: BTreeMap<&Anchor, usize> = BTreeMap::new();
        for anchor in self.anchors() {
            *counts.entry(anchor).or_default() += 1;
        }

        let duplicates: Vec<Anchor> = counts
            .iter()
            .filter(|(_, n)| **n > 1)
            .map(|(a, _)| (*a).clone())
            .collect();

        let links = self.link_targets();
        let unresolved: BTreeSet<Anchor> = links
            .iter()
            .filter(|a| !counts.contains_key(**a))
            .map(|a| (*a).clone())
            .collect();

        for anchor in &duplicates {
            log::warn!("anchor {} is attached to more than one heading", anchor);
        }
        for anchor in &unresolved {
            log::warn!("link target {} matches no heading", anchor);
        }

        LinkReport {
            anchor_count: counts.values().sum(),
            link_count: links.len(),
            unresolved: unresolved.into_iter().collect(),
            duplicates,
        }
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.stream
            .blocks()
            .filter_map(|block| block.plain_text())
            .filter(|text| !text.trim().is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Result of [`Document::link_report`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkReport {
    /// Number of heading anchors
    pub anchor_count: usize,

    /// Number of internal links
    pub link_count: usize,

    /// Link targets no heading carries
    pub unresolved: Vec<Anchor>,

    /// Anchors carried by more than one heading
    pub duplicates: Vec<Anchor>,
}

impl LinkReport {
    /// Check that every link resolves to exactly one heading.
    pub fn is_clean(&self) -> bool {
        self.unresolved.is_empty() && self.duplicates.is_empty()
    }
}

/// Document metadata, also the source of the cover page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Document title
    pub title: Option<String>,

    /// Subtitle
    pub subtitle: Option<String>,

    /// Short description
    pub description: Option<String>,

    /// Version label (e.g., "v1.0")
    pub version: Option<String>,

    /// Author or team
    pub author: Option<String>,

    /// Classification (e.g., "Public")
    pub classification: Option<String>,

    /// Generation timestamp
    pub created: Option<DateTime<Utc>>,
}

impl Metadata {
    /// Create metadata with a title.
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    /// Stamp the generation time as now.
    pub fn stamped(mut self) -> Self {
        self.created = Some(Utc::now());
        self
    }

    /// Convert metadata to YAML frontmatter format.
    pub fn to_yaml_frontmatter(&self) -> String {
        let mut lines = vec!["---".to_string()];

        let fields = [
            ("title", &self.title),
            ("subtitle", &self.subtitle),
            ("description", &self.description),
            ("version", &self.version),
            ("author", &self.author),
            ("classification", &self.classification),
        ];
        for (key, value) in fields {
            if let Some(value) = value {
                lines.push(format!("{}: \"{}\"", key, escape_yaml(value)));
            }
        }
        if let Some(ref created) = self.created {
            lines.push(format!("created: {}", created.to_rfc3339()));
        }

        lines.push("---".to_string());
        lines.push(String::new());

        lines.join("\n")
    }
}

/// Escape special characters for YAML strings.
fn escape_yaml(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

//! Section anchor derivation.
//!
//! Anchors are derived from heading text alone, so that the table of
//! contents can compute the same identifier for a section without ever
//! seeing the body stream. Both call sites go through [`section_anchor`],
//! which owns the numbering normalization.
//!
//! ```
//! use flowdoc::anchor::{anchor_for_number, derive_anchor};
//!
//! assert_eq!(derive_anchor("2.1 The Quantum Threat").as_str(), "sec_2_1");
//! assert_eq!(anchor_for_number("2.1"), derive_anchor("2.1 The Quantum Threat"));
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Prefix shared by every section anchor.
pub const ANCHOR_PREFIX: &str = "sec_";

/// Maximum number of words kept by the word-derived fallback.
const FALLBACK_WORDS: usize = 4;

fn markup_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]+>").unwrap())
}

fn numbering_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d+\.[\d.]*\s*|Appendix\s+[A-Z][.:]\s*)").unwrap())
}

fn non_word_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-zA-Z0-9\s]").unwrap())
}

/// A stable identifier attached to a heading and targeted by links.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Anchor(String);

impl Anchor {
    /// Wrap an already-derived identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier itself.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Fragment reference suitable for a hyperlink (`#sec_2_1`).
    pub fn href(&self) -> String {
        format!("#{}", self.0)
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Anchor {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Remove inline markup tags (`<b>`, `<font ...>`, `<a name=".."/>`).
pub fn strip_markup(text: &str) -> String {
    markup_regex().replace_all(text, "").into_owned()
}

/// Leading section number of already-stripped heading text, if any.
///
/// Recognizes dotted numerals (`"2."`, `"2.1 "`, `"10.4"`) and
/// `"Appendix X."` / `"Appendix X:"`. The returned slice still carries its
/// trailing punctuation and whitespace.
pub fn numbering_token(clean: &str) -> Option<&str> {
    numbering_regex().find(clean).map(|m| m.as_str())
}

/// Normalize a numbering token into the anchor body.
///
/// Trailing dots are trimmed, interior dots and whitespace runs become
/// `_`, colons are dropped. A run of spaces yields one `_`, so doubled
/// spacing in a heading does not change its anchor.
pub fn normalize_token(token: &str) -> String {
    let token = token.trim().trim_end_matches('.');
    let mut out = String::with_capacity(token.len());
    let mut in_space = false;

    for c in token.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push('_');
            }
            in_space = true;
            continue;
        }
        in_space = false;
        match c {
            '.' => out.push('_'),
            ':' => {}
            _ => out.push(c),
        }
    }
    out
}

/// Anchor for a numbering token. Shared by headings and the TOC.
pub fn section_anchor(token: &str) -> Anchor {
    Anchor(format!("{}{}", ANCHOR_PREFIX, normalize_token(token)))
}

/// Derive the anchor for a heading.
///
/// Never fails: text without a recognizable section number degrades to
/// an anchor built from its first four words.
pub fn derive_anchor(text: &str) -> Anchor {
    let clean = strip_markup(text);

    let anchor = match numbering_token(&clean) {
        Some(token) => section_anchor(token),
        None => word_anchor(&clean),
    };

    log::trace!("anchor {:?} -> {}", text, anchor);
    anchor
}

/// Anchor for a table-of-contents number such as `"2."`, `"2.1"` or `"A."`.
///
/// A bare capital letter denotes an appendix and resolves to the same
/// anchor as a heading reading `"Appendix <letter>: ..."`. Every letter
/// `A`-`Z` is treated this way, not only `A` and `B`, so `"C."` gives
/// `sec_Appendix_C` rather than `sec_C`.
pub fn anchor_for_number(number: &str) -> Anchor {
    let clean = number.trim().trim_end_matches('.');

    match appendix_letter(clean) {
        Some(letter) => section_anchor(&format!("Appendix {}", letter)),
        None => section_anchor(clean),
    }
}

fn appendix_letter(number: &str) -> Option<char> {
    let mut chars = number.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_uppercase() => Some(c),
        _ => None,
    }
}

fn word_anchor(clean: &str) -> Anchor {
    let words = non_word_regex().replace_all(clean, "");
    let joined = words
        .split_whitespace()
        .take(FALLBACK_WORDS)
        .map(|w| w.to_ascii_lowercase())
        .collect::<Vec<_>>()
        .join("_");
    Anchor(format!("{}{}", ANCHOR_PREFIX, joined))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbered_headings() {
        assert_eq!(derive_anchor("2.1 The Quantum Threat").as_str(), "sec_2_1");
        assert_eq!(derive_anchor("2. Introduction").as_str(), "sec_2");
        assert_eq!(derive_anchor("10.4 The C1 Fix").as_str(), "sec_10_4");
        assert_eq!(derive_anchor("9.4.2 Nested Step").as_str(), "sec_9_4_2");
    }

    #[test]
    fn test_appendix_headings() {
        assert_eq!(
            derive_anchor("Appendix A: Notation Reference").as_str(),
            "sec_Appendix_A"
        );
        assert_eq!(
            derive_anchor("Appendix B. Test Coverage").as_str(),
            "sec_Appendix_B"
        );
        // Without trailing punctuation the appendix pattern does not apply.
        assert_eq!(
            derive_anchor("Appendix C Extra").as_str(),
            "sec_appendix_c_extra"
        );
    }

    #[test]
    fn test_word_fallback() {
        assert_eq!(
            derive_anchor("No Numbering Here At All").as_str(),
            "sec_no_numbering_here_at"
        );
        assert_eq!(
            derive_anchor("Theorem 1: Correctness").as_str(),
            "sec_theorem_1_correctness"
        );
        assert_eq!(
            derive_anchor("Standard ML-DSA Tests (21 tests)").as_str(),
            "sec_standard_mldsa_tests_21"
        );
    }

    #[test]
    fn test_markup_is_stripped_first() {
        assert_eq!(
            derive_anchor("<b>2.3</b> What is <i>ML-DSA</i>?").as_str(),
            "sec_2_3"
        );
        assert_eq!(strip_markup("<font face=\"Mono\">x</font> y"), "x y");
    }

    #[test]
    fn test_degenerate_input() {
        assert_eq!(derive_anchor("").as_str(), "sec_");
        assert_eq!(derive_anchor("???").as_str(), "sec_");
        // A bare number without a dot is not a section token.
        assert_eq!(derive_anchor("2 Things").as_str(), "sec_2_things");
    }

    #[test]
    fn test_normalize_token() {
        assert_eq!(normalize_token("2.1 "), "2_1");
        assert_eq!(normalize_token("3."), "3");
        assert_eq!(normalize_token("Appendix A:"), "Appendix_A");
        assert_eq!(normalize_token("Appendix  A."), "Appendix_A");
    }

    #[test]
    fn test_anchor_for_number() {
        assert_eq!(anchor_for_number("1.").as_str(), "sec_1");
        assert_eq!(anchor_for_number("2.1").as_str(), "sec_2_1");
        assert_eq!(anchor_for_number("A.").as_str(), "sec_Appendix_A");
        assert_eq!(anchor_for_number("B").as_str(), "sec_Appendix_B");
        assert_eq!(anchor_for_number("C.").as_str(), "sec_Appendix_C");
        assert_eq!(anchor_for_number("Z").as_str(), "sec_Appendix_Z");
        assert_eq!(anchor_for_number("c.").as_str(), "sec_c");
    }

    #[test]
    fn test_whitespace_runs_collapse() {
        // One underscore per run, not one per space.
        assert_eq!(
            derive_anchor("Appendix  A: Notation").as_str(),
            "sec_Appendix_A"
        );
        assert_ne!(
            derive_anchor("Appendix  A: Notation").as_str(),
            "sec_Appendix__A"
        );
        assert_eq!(
            derive_anchor("Appendix \t A: Notation"),
            derive_anchor("Appendix A: Notation")
        );
    }

    #[test]
    fn test_href() {
        assert_eq!(derive_anchor("4.2 vs FROST").href(), "#sec_4_2");
    }
}

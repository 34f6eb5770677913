//! Integration tests for anchor agreement between headings and TOC links.

use flowdoc::anchor::{anchor_for_number, derive_anchor};
use flowdoc::toc::{link_rows, unresolved_entries};
use flowdoc::{FlowComposer, Metadata, TocEntry};

/// A slice of a real whitepaper outline: TOC rows and the headings they
/// point at, as the body spells them.
const OUTLINE: &[(&str, &str, bool, &str)] = &[
    ("1.", "Abstract", false, "1. Abstract"),
    ("2.", "Introduction", false, "2. Introduction"),
    (
        "2.1",
        "The Quantum Threat",
        true,
        "2.1 The Quantum Threat to Threshold Signatures",
    ),
    (
        "2.3",
        "What is ML-DSA (FIPS 204)?",
        true,
        "2.3 What is ML-DSA (FIPS 204)?",
    ),
    (
        "8.2",
        "Gosper's Hack for Subset Enumeration",
        true,
        "8.2 Gosper's Hack for Subset Enumeration",
    ),
    (
        "9.",
        "Dealerless DKG: The PERMAFROST Key Ceremony",
        false,
        "9. Dealerless DKG: The PERMAFROST Key Ceremony",
    ),
    ("10.4", "The C1 Fix", true, "10.4 The C1 Fix: Avoiding log(0)"),
    (
        "12.1",
        "Round 1: Commitment",
        true,
        "12.1 Round 1: Commitment",
    ),
    ("21.", "Known Limitations", false, "21. Known Limitations"),
    ("A.", "Notation Reference", false, "Appendix A: Notation Reference"),
    ("B.", "Test Coverage", false, "Appendix B: Test Coverage"),
];

fn entries() -> Vec<TocEntry> {
    OUTLINE
        .iter()
        .map(|(number, title, sub, _)| {
            if *sub {
                TocEntry::sub(*number, *title)
            } else {
                TocEntry::new(*number, *title)
            }
        })
        .collect()
}

#[test]
fn test_toc_and_heading_anchors_agree() {
    for (number, _, _, heading) in OUTLINE {
        assert_eq!(
            anchor_for_number(number),
            derive_anchor(heading),
            "TOC entry {:?} does not match heading {:?}",
            number,
            heading
        );
    }
}

#[test]
fn test_known_anchor_values() {
    assert_eq!(derive_anchor("2.1 The Quantum Threat").as_str(), "sec_2_1");
    assert_eq!(
        derive_anchor("Appendix A: Notation Reference").as_str(),
        "sec_Appendix_A"
    );
    assert_eq!(
        derive_anchor("No Numbering Here At All").as_str(),
        "sec_no_numbering_here_at"
    );
    assert_eq!(
        derive_anchor("Standard ML-DSA Tests (21 tests)").as_str(),
        "sec_standard_mldsa_tests_21"
    );
    assert_eq!(
        derive_anchor("<b>3.2</b> On-Chain Indistinguishability").as_str(),
        "sec_3_2"
    );
    assert_eq!(derive_anchor("").as_str(), "sec_");
}

#[test]
fn test_composed_document_links_resolve() {
    let entries = entries();

    let mut composer = FlowComposer::new(Metadata::with_title("PERMAFROST")).unwrap();
    composer.table_of_contents(&entries);
    for (_, _, sub, heading) in OUTLINE {
        if *sub {
            composer.sub_heading(*heading);
        } else {
            composer.section_heading(*heading);
        }
        composer.body("Body text.");
    }
    let doc = composer.finalize();

    let report = doc.link_report();
    assert!(report.is_clean(), "unexpected report: {:?}", report);
    assert_eq!(report.anchor_count, OUTLINE.len());
    assert_eq!(report.link_count, OUTLINE.len() * 2);
    assert!(unresolved_entries(&entries, &doc).is_empty());
}

#[test]
fn test_missing_heading_is_reported() {
    let entries = vec![TocEntry::new("1.", "Abstract"), TocEntry::new("2.", "Gone")];

    let mut composer = FlowComposer::new(Metadata::default()).unwrap();
    composer.table_of_contents(&entries);
    composer.section_heading("1. Abstract");
    composer.body("text");
    let doc = composer.finalize();

    let report = doc.link_report();
    assert_eq!(report.unresolved.len(), 1);
    assert_eq!(report.unresolved[0].as_str(), "sec_2");

    let missing = unresolved_entries(&entries, &doc);
    assert_eq!(missing, vec![&entries[1]]);
}

#[test]
fn test_duplicate_anchor_is_reported() {
    let mut composer = FlowComposer::new(Metadata::default()).unwrap();
    composer.sub_sub_heading("Security Proof Sketch One");
    composer.body("a");
    composer.sub_sub_heading("Security Proof Sketch One (revised)");
    composer.body("b");
    let doc = composer.finalize();

    let report = doc.link_report();
    assert_eq!(report.duplicates.len(), 1);
    assert_eq!(report.duplicates[0].as_str(), "sec_security_proof_sketch_one");
}

#[test]
fn test_rows_follow_entry_order() {
    let rows = link_rows(&entries());
    assert_eq!(rows.len(), OUTLINE.len());
    assert_eq!(rows[0].plain_text(), "1. Abstract");
    assert_eq!(rows[rows.len() - 1].plain_text(), "B. Test Coverage");
}

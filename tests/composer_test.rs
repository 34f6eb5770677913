//! Integration tests for heading/content bonding in the flow composer.

use flowdoc::{
    Callout, FlowBlock, FlowComposer, HeadingLevel, Metadata, Paragraph, Severity, StepIndicator,
    StreamItem, Table,
};

fn composer() -> FlowComposer {
    FlowComposer::new(Metadata::with_title("Test")).unwrap()
}

fn kinds(blocks: &[FlowBlock]) -> Vec<&'static str> {
    blocks.iter().map(FlowBlock::kind).collect()
}

fn heading_text(block: &FlowBlock) -> Option<String> {
    block.as_heading().map(|h| h.text.plain_text())
}

#[test]
fn test_heading_and_content_form_one_group() {
    let mut c = composer();
    c.section_heading("1. X");
    c.content(Paragraph::body("P"));
    let doc = c.finalize();

    assert_eq!(doc.stream.len(), 1);
    match &doc.stream.items()[0] {
        StreamItem::KeepTogether(blocks) => {
            assert_eq!(
                kinds(blocks),
                vec!["page_break", "heading", "accent_bar", "spacer", "paragraph"]
            );
            assert_eq!(heading_text(&blocks[1]).as_deref(), Some("1. X"));
        }
        other => panic!("expected group, got {:?}", other),
    }
}

#[test]
fn test_consecutive_headings_flush_first_alone() {
    let mut c = composer();
    c.section_heading("1. X");
    c.section_heading("2. Y");

    // X is released as standalone blocks, Y is held back.
    assert!(c.is_pending());
    assert_eq!(c.stream().group_count(), 0);
    assert_eq!(
        kinds(&c.stream().blocks().cloned().collect::<Vec<_>>()),
        vec!["page_break", "heading", "accent_bar", "spacer"]
    );

    c.body("after Y");
    let doc = c.finalize();

    assert_eq!(doc.stream.group_count(), 1);
    let group = doc.stream.items().last().unwrap();
    assert!(group.is_group());
    assert_eq!(heading_text(&group.blocks()[1]).as_deref(), Some("2. Y"));
}

#[test]
fn test_finalize_emits_pending_heading_once() {
    let mut c = composer();
    c.section_heading("1. X");
    let doc = c.finalize();

    assert_eq!(doc.stream.group_count(), 0);
    assert_eq!(doc.headings().count(), 1);
    assert_eq!(doc.stream.block_count(), 4);
}

#[test]
fn test_spacer_releases_pending_heading() {
    let mut c = composer();
    c.sub_heading("2.1 Topic");
    c.spacer(20.0);
    c.body("text");
    let doc = c.finalize();

    assert_eq!(doc.stream.group_count(), 0);
    let blocks: Vec<_> = doc.stream.blocks().cloned().collect();
    assert_eq!(
        kinds(&blocks),
        vec!["spacer", "heading", "spacer", "spacer", "paragraph"]
    );
    assert_eq!(blocks[3], FlowBlock::Spacer { height: 20.0 });
}

#[test]
fn test_every_content_kind_bonds() {
    let table = Table::new(["A", "B"], vec![vec!["1", "2"]], vec![0.5, 0.5]).unwrap();

    let mut c = composer();
    c.sub_heading("1.1 Table");
    c.table(table);
    c.sub_heading("1.2 Code");
    c.code("let x = 1;", "rust");
    c.sub_heading("1.3 Callout");
    c.callout(Callout::new("Careful", Severity::Critical));
    c.sub_heading("1.4 Step");
    c.step(StepIndicator::new(1, "Commit", "Hash the nonce").last());
    c.sub_heading("1.5 Small");
    c.body_small("fine print");
    let doc = c.finalize();

    assert_eq!(doc.stream.len(), 5);
    assert_eq!(doc.stream.group_count(), 5);
    let closers: Vec<_> = doc
        .stream
        .items()
        .iter()
        .map(|item| item.blocks().last().unwrap().kind())
        .collect();
    assert_eq!(
        closers,
        vec!["table", "code_block", "callout", "step_indicator", "paragraph"]
    );
}

#[test]
fn test_no_block_lost_or_duplicated() {
    let mut c = composer();
    c.body("preamble");
    c.section_heading("1. One");
    c.body("one-a");
    c.body("one-b");
    c.sub_heading("1.1 Nested");
    c.sub_sub_heading("Theorem 1: Correctness");
    c.info_box("insight");
    c.page_break();
    c.sub_heading("1.2 Dangling");
    let doc = c.finalize();

    let texts: Vec<String> = doc
        .stream
        .blocks()
        .filter_map(FlowBlock::plain_text)
        .collect();
    assert_eq!(
        texts,
        vec![
            "preamble",
            "1. One",
            "one-a",
            "one-b",
            "1.1 Nested",
            "Theorem 1: Correctness",
            "KEY INSIGHT\ninsight",
            "1.2 Dangling",
        ]
    );

    // Only the first block after a heading bonds.
    assert_eq!(doc.stream.group_count(), 2);
    assert_eq!(doc.headings().count(), 4);
}

#[test]
fn test_heading_levels() {
    let mut c = composer();
    assert_eq!(
        c.heading(HeadingLevel::try_from(2).unwrap(), "3.4 OPNet Integration")
            .as_str(),
        "sec_3_4"
    );
    assert!(HeadingLevel::try_from(0).is_err());
    assert!(HeadingLevel::try_from(4).is_err());
}

#[test]
fn test_independent_composers() {
    let mut a = composer();
    let mut b = composer();
    a.section_heading("1. A");
    b.body("unrelated");

    assert!(a.is_pending());
    assert!(!b.is_pending());
    assert_eq!(b.stream().len(), 1);
    assert!(a.stream().is_empty());
}

//! Integration tests for composing document scripts from files.

use std::fs;
use std::path::PathBuf;

use flowdoc::{compose_file, load_script, Error, FlowBlock, Flowdoc, HeadingLevel, PageLayout};
use tempfile::TempDir;

fn demo_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos/whitepaper.json")
}

#[test]
fn test_load_demo_script() {
    let script = load_script(demo_path()).unwrap();
    assert_eq!(script.metadata.title.as_deref(), Some("PERMAFROST"));
    assert_eq!(script.toc.len(), 9);
    assert!(script.toc[2].is_sub_level);
    assert!(script.cover.is_some());
}

#[test]
fn test_compose_demo_script() {
    let doc = compose_file(demo_path()).unwrap();

    let levels: Vec<HeadingLevel> = doc.headings().map(|h| h.level).collect();
    assert_eq!(levels.len(), 10);
    assert_eq!(levels[0], HeadingLevel::Section);
    assert_eq!(levels[7], HeadingLevel::Subsubsection);

    // Headings followed directly by another heading stay unbonded.
    assert_eq!(doc.stream.group_count(), 7);

    let report = doc.link_report();
    assert!(report.is_clean(), "unexpected report: {:?}", report);
    assert_eq!(report.anchor_count, 10);
    assert_eq!(report.link_count, 18);
}

#[test]
fn test_demo_starts_with_cover_and_toc() {
    let doc = compose_file(demo_path()).unwrap();
    let blocks: Vec<&FlowBlock> = doc.stream.blocks().collect();

    match blocks[0] {
        FlowBlock::Cover(cover) => {
            assert_eq!(cover.title, "PERMAFROST");
            assert_eq!(cover.version.as_deref(), Some("v1.0"));
        }
        other => panic!("expected cover, got {:?}", other),
    }
    assert_eq!(blocks[1].plain_text().as_deref(), Some("Table of Contents"));
}

#[test]
fn test_layout_override() {
    let result = Flowdoc::new()
        .with_layout(PageLayout::letter())
        .compose(demo_path())
        .unwrap();
    assert_eq!(result.document().layout, PageLayout::letter());

    match result.document().stream.blocks().find(|b| b.kind() == "accent_bar") {
        Some(FlowBlock::AccentBar { width, .. }) => {
            assert_eq!(*width, PageLayout::letter().content_width());
        }
        other => panic!("expected accent bar, got {:?}", other),
    };
}

#[test]
fn test_malformed_script_names_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, r#"{"body": [{"type": "heading", "text": "no level"}]}"#).unwrap();

    match load_script(&path) {
        Err(Error::Script(msg)) => assert!(msg.contains("broken.json")),
        other => panic!("expected script error, got {:?}", other),
    }
}

#[test]
fn test_invalid_layout_in_script() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tiny.json");
    fs::write(
        &path,
        r#"{"layout": {"width": 100.0, "height": 100.0, "margin_left": 60.0,
                       "margin_right": 60.0, "margin_top": 10.0, "margin_bottom": 10.0},
            "body": []}"#,
    )
    .unwrap();

    assert!(matches!(compose_file(&path), Err(Error::InvalidLayout(_))));
}

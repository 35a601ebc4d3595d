//! Integration tests for loading notes from files, bytes and readers.

use std::fs;

use notedown::parser::{parse_files, parse_many};
use notedown::{
    parse_bytes_with_options, parse_file, parse_file_with_options, parse_reader, Error,
    ParseOptions, Section, SectionKind,
};

#[test]
fn test_parse_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("note.md");
    fs::write(&path, "\u{FEFF}# Title\r\n- a\r\n- b\r\n").unwrap();

    let doc = parse_file(&path).unwrap();
    assert_eq!(doc.len(), 2);
    assert_eq!(doc.sections[0], Section::heading("Title", 1));
    assert_eq!(doc.list_item_count(), 2);
}

#[test]
fn test_parse_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = parse_file(dir.path().join("nope.md"));
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn test_invalid_utf8_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.md");
    fs::write(&path, [b'a', 0xFF, b'b']).unwrap();

    assert!(matches!(parse_file(&path), Err(Error::InvalidInput(_))));

    let doc = parse_file_with_options(&path, ParseOptions::new().lenient()).unwrap();
    assert_eq!(doc.sections, vec![Section::text("a\u{FFFD}b")]);
}

#[test]
fn test_escaped_newlines() {
    let data = br#"# Generated\n\n- one\n- two"#;
    let plain = parse_bytes_with_options(data, ParseOptions::new()).unwrap();
    assert_eq!(plain.len(), 1);

    let options = ParseOptions::new().with_unescape_newlines(true);
    let doc = parse_bytes_with_options(data, options).unwrap();
    assert_eq!(doc.count(SectionKind::Title), 1);
    assert_eq!(doc.count(SectionKind::List), 1);
}

#[test]
fn test_parse_reader() {
    let doc = parse_reader(std::io::Cursor::new("***\n> q")).unwrap();
    assert_eq!(doc.len(), 2);
}

#[test]
fn test_parse_files_keeps_going() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("good.md");
    let missing = dir.path().join("missing.md");
    fs::write(&good, "text").unwrap();

    let results = parse_files(&[good.clone(), missing.clone()], &ParseOptions::default());
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].0, good);
    assert!(results[0].1.is_ok());
    assert_eq!(results[1].0, missing);
    assert!(results[1].1.is_err());
}

#[test]
fn test_parse_many_parallel_matches_sequential() {
    let texts: Vec<String> = (0..64)
        .map(|i| format!("# Note {i}\n- item {i}\n  - child\n```\ncode {i}\n```"))
        .collect();
    let parallel = parse_many(&texts, &ParseOptions::new());
    let sequential = parse_many(&texts, &ParseOptions::new().sequential());
    assert_eq!(parallel, sequential);
    assert_eq!(parallel[10].sections[0], Section::heading("Note 10", 1));
}

#[test]
fn test_document_outline() {
    let doc = notedown::parse("# A\n## B\n### C\n## D\n# E");
    let outline = doc.outline();
    assert_eq!(outline.items.len(), 2);
    assert_eq!(outline.items[0].children.len(), 2);
    assert_eq!(outline.items[0].children[0].children[0].title, "C");
    assert_eq!(outline.total_items(), 5);
}

#[cfg(feature = "async")]
#[tokio::test]
async fn test_parse_file_async() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("async.md");
    fs::write(&path, "## Async\ntext").unwrap();

    let doc = notedown::parser::parse_file_async(&path, ParseOptions::default())
        .await
        .unwrap();
    assert_eq!(doc.sections[0], Section::heading("Async", 2));
}

//! Loading and dumping the Salmon fixture.

use crate::common::{salmon_index, SALMON_INDEX, SALMON_TEXT};
use sphindex::codec::ParseErrorKind;
use sphindex::{dump_index, load_index, read_index, write_index, Anchor, Error};
use tempfile::TempDir;

#[test]
fn test_fixture_round_trips_byte_for_byte() {
    let index = salmon_index();
    let dumped = dump_index(&index).unwrap();
    assert_eq!(dumped.len(), SALMON_TEXT.len());
    assert!(dumped == *SALMON_TEXT, "dump differs from what Sphinx wrote");
}

#[test]
fn test_fixture_shape() {
    let index = salmon_index();
    assert_eq!(index.doc_count(), 25);
    assert_eq!(index.filenames.len(), 25);
    assert_eq!(index.titles.len(), 25);
    assert_eq!(index.terms.len(), 1180);
    assert_eq!(index.titleterms.len(), 95);
    assert_eq!(index.object_count(), 42);
    assert_eq!(index.envversion.sphinx(), Some(56));
    assert!(index.extra.is_empty());

    let types: Vec<&str> = index.objtypes.values().map(String::as_str).collect();
    assert_eq!(types, vec!["py:class", "py:property", "py:method"]);
    assert_eq!(index.objnames[&1].label, "Python property");
}

#[test]
fn test_fixture_unicode_and_anchors() {
    let index = salmon_index();
    let home = index.doc_id("index").unwrap();
    let doc = index.doc(home).unwrap();
    assert_eq!(doc.title, "Welcome to Salmon\u{2019}s documentation!");
    assert_eq!(doc.filename, "index.rst");
    assert!(SALMON_TEXT.contains("Salmon\\u2019s"));

    let runner = &index.objects["salmon.backend.sampler"]["Runner"];
    assert_eq!(runner.doc, 7);
    assert_eq!(runner.anchor, Anchor::FullName);
    assert_eq!(
        index.docnames[runner.doc as usize],
        "generated/salmon.backend.sampler.Runner"
    );
}

#[test]
fn test_read_write_files() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("html").join("searchindex.js");

    let index = read_index(SALMON_INDEX.as_ref()).unwrap();
    let written = write_index(&path, &index).unwrap();
    assert_eq!(written, SALMON_TEXT.len());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), *SALMON_TEXT);
    assert_eq!(read_index(&path).unwrap(), index);
}

#[test]
fn test_truncated_fixture_is_a_parse_error() {
    let cut = &SALMON_TEXT[..SALMON_TEXT.len() / 2];
    match load_index(cut) {
        Err(Error::Parse(err)) => assert_eq!(err.kind, ParseErrorKind::UnclosedWrapper),
        other => panic!("expected a parse error, got {:?}", other.map(|_| ())),
    }

    let unwrapped = &SALMON_TEXT["Search.setIndex(".len()..SALMON_TEXT.len() - 1];
    let cut = &unwrapped[..unwrapped.len() - 2];
    assert!(matches!(load_index(cut), Err(Error::Parse(_))));
}

#[test]
fn test_missing_file_is_a_read_error() {
    let err = read_index("data/fixtures/does-not-exist.js".as_ref()).unwrap_err();
    assert!(matches!(err, Error::Read { .. }));
}

//! Loading page documents listed in a manifest.

use crate::common::build_fixture;
use sphindex::build::{load_document, load_documents, read_manifest};
use sphindex::{run_build, BuildOptions, Error};
use tempfile::TempDir;

#[test]
fn test_load_fixture_documents() {
    let dir = build_fixture("valid");
    let manifest = read_manifest(&dir).unwrap();
    let docs = load_documents(&dir, &manifest).unwrap();

    let names: Vec<&str> = docs.iter().map(|d| d.docname.as_str()).collect();
    assert_eq!(names, vec!["index", "runner", "samplers"]);

    let samplers = &docs[2];
    assert_eq!(samplers.objects.len(), 3);
    assert_eq!(samplers.objects[2].priority, 0);
    assert_eq!(samplers.objects[0].priority, 1);
    assert_eq!(docs[0].headings, vec!["Installation"]);
    assert!(docs[1].headings.is_empty());
}

#[test]
fn test_load_single_document() {
    let doc = load_document(&build_fixture("valid"), "docs/runner.json").unwrap();
    assert_eq!(doc.filename, "generated/runner.rst");
    assert_eq!(doc.objects[0].display_name(), "salmon.backend.sampler.Runner");
    assert_eq!(doc.objects[0].anchor(), "salmon.backend.sampler.Runner");
}

#[test]
fn test_missing_document_aborts_build() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("searchindex.js");
    let err = run_build(&build_fixture("missing-doc"), &output, BuildOptions::default()).unwrap_err();
    match err {
        Error::Read { path, .. } => assert!(path.ends_with("docs/nowhere.json")),
        other => panic!("expected a read error, got {other}"),
    }
    assert!(!output.exists());
}

#[test]
fn test_document_without_title_is_rejected() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("page.json"), r#"{"docname": "page", "filename": "page.rst"}"#)
        .unwrap();
    let err = load_document(dir.path(), "page.json").unwrap_err();
    assert!(matches!(err, Error::Document { .. }));
}

//! Incremental rebuilds on top of an existing `searchindex.js`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::common::build_fixture;
use sphindex::{read_index, run_build, BuildOptions, Postings};
use tempfile::TempDir;

const UPDATED_RUNNER: &str = r#"{
  "docname": "runner",
  "filename": "generated/runner.rst",
  "title": "Runner",
  "text": "The runner now streams answers through Kafka.",
  "objects": [
    {"name": "salmon.backend.sampler.Runner", "domain": "py", "kind": "class", "label": "Python class"}
  ]
}"#;

const ENVVERSION: &str = r#"{"sphinx": 56, "sphinx.domains.python": 3}"#;

fn incremental() -> BuildOptions {
    BuildOptions {
        incremental: true,
        progress: false,
    }
}

/// Input directory re-reading only the updated runner page.
fn runner_only_input(root: &Path, docnames: Option<&[&str]>) -> PathBuf {
    let input = root.join("runner-only");
    fs::create_dir_all(&input).unwrap();
    fs::write(input.join("runner.json"), UPDATED_RUNNER).unwrap();
    let docnames = match docnames {
        Some(names) => format!(r#", "docnames": {}"#, serde_json::to_string(names).unwrap()),
        None => String::new(),
    };
    fs::write(
        input.join("manifest.json"),
        format!(
            r#"{{"version": 1, "documents": ["runner.json"], "envversion": {}{}}}"#,
            ENVVERSION, docnames
        ),
    )
    .unwrap();
    input
}

/// Input directory holding every page, with the updated runner.
fn full_input(root: &Path) -> PathBuf {
    let input = root.join("full");
    fs::create_dir_all(&input).unwrap();
    for page in ["index", "samplers"] {
        let source = build_fixture("valid").join("docs").join(format!("{}.json", page));
        fs::copy(source, input.join(format!("{}.json", page))).unwrap();
    }
    fs::write(input.join("runner.json"), UPDATED_RUNNER).unwrap();
    fs::write(
        input.join("manifest.json"),
        format!(
            r#"{{"version": 1, "documents": ["index.json", "runner.json", "samplers.json"], "envversion": {}}}"#,
            ENVVERSION
        ),
    )
    .unwrap();
    input
}

#[test]
fn test_incremental_keeps_listed_pages() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("searchindex.js");
    run_build(&build_fixture("valid"), &output, BuildOptions::default()).unwrap();

    let input = runner_only_input(dir.path(), Some(&["index", "runner", "samplers"]));
    let summary = run_build(&input, &output, incremental()).unwrap();
    assert_eq!(summary.documents, 3);
    assert_eq!(summary.fed, 1);
    assert_eq!(summary.kept, 2);
    assert_eq!(summary.objects, 4);

    let index = read_index(&output).unwrap();
    assert_eq!(index.docnames, vec!["index", "runner", "samplers"]);
    // Words from the old runner text are gone, the new ones are in.
    assert!(!index.terms.contains_key("redi"));
    assert_eq!(index.terms["kafka"], Postings::One(1));
    assert_eq!(index.terms["queri"], Postings::One(2));
    // Untouched pages survive.
    assert_eq!(index.terms["docker"], Postings::One(0));
    assert!(index.objects["salmon.triplets.samplers"].contains_key("Adaptive"));
}

#[test]
fn test_incremental_matches_full_build() {
    let dir = TempDir::new().unwrap();
    let incremental_out = dir.path().join("incremental.js");
    run_build(&build_fixture("valid"), &incremental_out, BuildOptions::default()).unwrap();
    let input = runner_only_input(dir.path(), Some(&["index", "runner", "samplers"]));
    run_build(&input, &incremental_out, incremental()).unwrap();

    let full_out = dir.path().join("full.js");
    run_build(&full_input(dir.path()), &full_out, BuildOptions::default()).unwrap();

    assert_eq!(
        fs::read_to_string(&incremental_out).unwrap(),
        fs::read_to_string(&full_out).unwrap()
    );
}

#[test]
fn test_pages_not_listed_are_pruned() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("searchindex.js");
    run_build(&build_fixture("valid"), &output, BuildOptions::default()).unwrap();

    let input = runner_only_input(dir.path(), Some(&["runner", "samplers"]));
    let summary = run_build(&input, &output, incremental()).unwrap();
    assert_eq!(summary.kept, 1);

    let index = read_index(&output).unwrap();
    assert_eq!(index.docnames, vec!["runner", "samplers"]);
    assert!(!index.terms.contains_key("docker"));
    assert!(!index.titleterms.contains_key("welcom"));
    assert_eq!(index.terms["queri"], Postings::One(1));
}

#[test]
fn test_without_docnames_only_fed_pages_remain() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("searchindex.js");
    run_build(&build_fixture("valid"), &output, BuildOptions::default()).unwrap();

    let input = runner_only_input(dir.path(), None);
    let summary = run_build(&input, &output, incremental()).unwrap();
    assert_eq!((summary.documents, summary.kept), (1, 0));
    assert_eq!(read_index(&output).unwrap().docnames, vec!["runner"]);
}

#[test]
fn test_unreadable_previous_index_falls_back_to_full_build() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("searchindex.js");
    fs::write(&output, "Search.setIndex({docnames:[").unwrap();

    let summary = run_build(&build_fixture("valid"), &output, incremental()).unwrap();
    assert_eq!((summary.documents, summary.fed, summary.kept), (3, 3, 0));
}

//! End-to-end tests for the build workflow.

use crate::common::build_fixture;
use sphindex::{
    read_index, run_build, verify, Anchor, BuildOptions, Postings, Searcher, WellFormedIndex,
};
use tempfile::TempDir;

fn build_valid(dir: &TempDir) -> std::path::PathBuf {
    let output = dir.path().join("html").join("searchindex.js");
    run_build(&build_fixture("valid"), &output, BuildOptions::default()).unwrap();
    output
}

#[test]
fn test_run_build_e2e_basic() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("html").join("searchindex.js");
    let summary = run_build(&build_fixture("valid"), &output, BuildOptions::default()).unwrap();

    assert!(output.exists(), "searchindex.js should be created");
    assert_eq!(summary.output, output);
    assert_eq!(summary.documents, 3);
    assert_eq!(summary.fed, 3);
    assert_eq!(summary.kept, 0);
    assert_eq!(summary.objects, 4);
    assert_eq!(summary.bytes, std::fs::metadata(&output).unwrap().len() as usize);

    let text = std::fs::read_to_string(&output).unwrap();
    assert!(text.starts_with("Search.setIndex({docnames:[\"index\",\"runner\",\"samplers\"]"));
    assert!(text.ends_with("})"));
}

#[test]
fn test_built_index_contents() {
    let dir = TempDir::new().unwrap();
    let index = read_index(&build_valid(&dir)).unwrap();
    assert!(verify(&index).is_clean());

    assert_eq!(index.filenames, vec!["index.rst", "generated/runner.rst", "samplers.rst"]);
    assert_eq!(index.titles, vec!["Welcome to Salmon", "Runner", "Samplers"]);
    assert_eq!(index.envversion.sphinx(), Some(56));

    // Title and heading words.
    assert_eq!(index.titleterms["welcom"], Postings::One(0));
    assert_eq!(index.titleterms["instal"], Postings::One(0));
    assert_eq!(index.titleterms["runner"], Postings::One(1));
    assert_eq!(index.titleterms["sampler"], Postings::One(2));
    assert!(!index.titleterms.contains_key("to"));

    // Body words already indexed as title words on the same page are skipped.
    assert!(!index.terms.contains_key("instal"));
    assert!(!index.terms.contains_key("salmon"));
    assert_eq!(index.terms["docker"], Postings::One(0));
    assert_eq!(index.terms["queri"], Postings::Many(vec![1, 2]));
    assert_eq!(index.terms["redi"], Postings::One(1));
    // Stopwords are case-sensitive.
    assert_eq!(index.terms["The"], Postings::One(1));
    assert!(!index.terms.contains_key("the"));

    let types: Vec<&str> = index.objtypes.values().map(String::as_str).collect();
    assert_eq!(types, vec!["py:class", "py:method"]);
    let runner = &index.objects["salmon.backend.sampler"]["Runner"];
    assert_eq!((runner.doc, runner.objtype, runner.priority), (1, 0, 1));
    assert_eq!(runner.anchor, Anchor::FullName);
    let get_query = &index.objects["salmon.triplets.samplers.Adaptive"]["get_query"];
    assert_eq!((get_query.doc, get_query.objtype, get_query.priority), (2, 1, 0));
}

#[test]
fn test_search_built_index() {
    let dir = TempDir::new().unwrap();
    let index = WellFormedIndex::new(read_index(&build_valid(&dir)).unwrap()).unwrap();
    let searcher = Searcher::new(&index);

    let results = searcher.search("adaptive", 10);
    assert_eq!(results.results[0].title, "salmon.triplets.samplers.Adaptive");
    assert_eq!(results.results[0].score, 16);
    assert_eq!(results.results[1].title, "salmon.triplets.samplers.Adaptive.get_query");
    assert_eq!(results.results[1].score, 15);

    let results = searcher.search("queries", 10);
    let pages: Vec<(&str, i32)> = results
        .results
        .iter()
        .map(|r| (r.docname.as_str(), r.score))
        .collect();
    assert_eq!(pages, vec![("runner", 5), ("samplers", 5)]);
}

#[test]
fn test_rebuild_is_deterministic() {
    let dir = TempDir::new().unwrap();
    let first = std::fs::read_to_string(build_valid(&dir)).unwrap();
    let second = std::fs::read_to_string(build_valid(&dir)).unwrap();
    assert_eq!(first, second);
}

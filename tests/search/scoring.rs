//! Ranking weights loaded from scorer JSON files.

use crate::common::sample_index;
use sphindex::{Error, ResultKind, Scorer, Searcher};
use tempfile::TempDir;

fn write_scorer(dir: &TempDir, json: &str) -> std::path::PathBuf {
    let path = dir.path().join("scorer.json");
    std::fs::write(&path, json).unwrap();
    path
}

#[test]
fn test_scorer_file_reorders_results() {
    let dir = TempDir::new().unwrap();
    let path = write_scorer(&dir, r#"{"objPrio": {"0": 0, "1": 0, "2": 0}, "title": 50}"#);
    let scorer = Scorer::from_json_file(&path).unwrap();
    assert_eq!(scorer.term, 5);
    assert_eq!(scorer.object_priority(1), 0);

    let index = sample_index();
    let results = Searcher::new(&index).with_scorer(scorer).search("runner", 10);
    let got: Vec<(&str, i32, ResultKind)> = results
        .results
        .iter()
        .map(|r| (r.title.as_str(), r.score, r.kind))
        .collect();
    assert_eq!(
        got,
        vec![
            ("Runner", 50, ResultKind::Text),
            ("salmon.backend.sampler.Runner", 11, ResultKind::Object),
            ("salmon.backend.sampler.Runner.run", 0, ResultKind::Object),
        ]
    );
}

#[test]
fn test_unknown_priority_uses_default() {
    let dir = TempDir::new().unwrap();
    let path = write_scorer(&dir, r#"{"objPrio": {}, "objPrioDefault": 3}"#);
    let scorer = Scorer::from_json_file(&path).unwrap();
    assert_eq!(scorer.object_priority(0), 3);
    assert_eq!(scorer.object_priority(7), 3);
}

#[test]
fn test_malformed_scorer_file() {
    let dir = TempDir::new().unwrap();
    let path = write_scorer(&dir, r#"{"title": "high"}"#);
    assert!(matches!(
        Scorer::from_json_file(&path),
        Err(Error::Scorer { .. })
    ));
    assert!(matches!(
        Scorer::from_json_file(&dir.path().join("absent.json")),
        Err(Error::Read { .. })
    ));
}

//! Query syntax and merged ranking on the sample index.

use crate::common::sample_index;
use sphindex::{Query, Searcher};

fn titles_and_scores(query: &str) -> Vec<(String, i32)> {
    let index = sample_index();
    Searcher::new(&index)
        .search(query, 20)
        .results
        .into_iter()
        .map(|r| (r.title, r.score))
        .collect()
}

fn expected(pairs: &[(&str, i32)]) -> Vec<(String, i32)> {
    pairs.iter().map(|(t, s)| (t.to_string(), *s)).collect()
}

#[test]
fn test_excluded_word_removes_pages_only() {
    assert_eq!(
        titles_and_scores("samplers -random"),
        expected(&[
            ("salmon.triplets.samplers.Adaptive.get_query", 15),
            ("Samplers", 15),
            ("salmon.triplets.samplers.Adaptive", 5),
            ("salmon.triplets.samplers.Random", 5),
            ("Welcome to Salmon", 5),
        ])
    );
}

#[test]
fn test_every_word_must_match() {
    // "docker" only occurs on the index page.
    assert_eq!(
        titles_and_scores("redis docker"),
        expected(&[("Welcome to Salmon", 5)])
    );
    // Processing stops at a word with no match at all.
    assert!(titles_and_scores("redis zzzz docker").is_empty());
}

#[test]
fn test_stopwords_ignored_for_pages() {
    let query = Query::parse("the runner");
    assert_eq!(query.search_terms, vec!["runner"]);
    assert_eq!(query.highlight, vec!["runner"]);
    // Object terms keep every token, so "the" must also occur near an
    // object for it to match.
    assert_eq!(query.object_terms, vec!["the", "runner"]);
    assert_eq!(titles_and_scores("the runner"), expected(&[("Runner", 15)]));
}

#[test]
fn test_case_insensitive() {
    assert_eq!(titles_and_scores("RUNNER"), titles_and_scores("runner"));
}

#[test]
fn test_limit_applies_after_ranking() {
    let index = sample_index();
    let results = Searcher::new(&index).search("samplers", 2);
    let scores: Vec<i32> = results.results.iter().map(|r| r.score).collect();
    assert_eq!(scores, vec![15, 15]);
}

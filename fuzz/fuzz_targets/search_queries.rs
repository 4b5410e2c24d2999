// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for query parsing and search.
//!
//! Emoji, lone dashes, RTL text and megabyte-long tokens go through the query
//! parser and both search passes over the Salmon fixture. Results must stay
//! within the limit and point at real pages.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sphindex::{load_index, Query, Searcher, WellFormedIndex};
use std::fs;
use std::sync::OnceLock;

fuzz_target!(|query: &str| {
    // Fuzz runs start in fuzz/, tests from the crate root.
    static INDEX: OnceLock<WellFormedIndex> = OnceLock::new();
    let index = INDEX.get_or_init(|| {
        let paths = [
            "data/fixtures/salmon-searchindex.js",
            "../data/fixtures/salmon-searchindex.js",
        ];
        let text = paths
            .iter()
            .find_map(|p| fs::read_to_string(p).ok())
            .expect("Failed to read fixture from any path");
        WellFormedIndex::new(load_index(&text).expect("fixture parses")).expect("fixture verifies")
    });

    let parsed = Query::parse(query);
    let results = Searcher::new(index).search_query(&parsed, 10);
    assert!(results.len() <= 10);
    for hit in &results.results {
        assert!(index.doc_id(&hit.docname).is_some());
    }
});

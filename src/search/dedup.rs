// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Final ordering of merged object and full-text results.
//!
//! The same link can come back several times: once per query token that
//! matched an object, and again from the full-text pass. A result is the
//! same when it points at the same `(docname, anchor, title)`; only the best
//! scoring copy survives, the first one on ties.
//!
//! **Invariant**: no two results share a `(docname, anchor, title)` key.
//!
//! **Verified by**: `prop_results_unique_and_sorted` (tests/property/search.rs)

use std::cmp::Ordering;
use std::collections::HashMap;

use super::SearchResult;

/// Deduplicate, sort by score (descending) then title (case-insensitive,
/// ascending), and keep at most `limit` results.
pub fn rank(results: Vec<SearchResult>, limit: usize) -> Vec<SearchResult> {
    let mut best: HashMap<(String, String, String), usize> = HashMap::new();
    let mut kept: Vec<SearchResult> = Vec::with_capacity(results.len());

    for result in results {
        let key = (
            result.docname.clone(),
            result.anchor.clone(),
            result.title.clone(),
        );
        match best.get(&key) {
            Some(&slot) => {
                if result.score > kept[slot].score {
                    kept[slot] = result;
                }
            }
            None => {
                best.insert(key, kept.len());
                kept.push(result);
            }
        }
    }

    kept.sort_by(compare_results);
    kept.truncate(limit);
    kept
}

/// Display order: higher score first, then title alphabetically.
pub fn compare_results(a: &SearchResult, b: &SearchResult) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
}

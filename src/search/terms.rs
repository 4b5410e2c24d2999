// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Full-text lookup over `terms` and `titleterms`.
//!
//! Each search term is looked up exactly in both maps. A term longer than two
//! characters that has no exact entry in a map also matches every key of that
//! map containing it, at the lower partial score. Processing stops at the
//! first term that matches nothing at all.
//!
//! A page qualifies when it matched every term, or every term longer than two
//! characters, and none of the excluded terms. Its score is the best score of
//! any single (page, term) match.

use std::collections::{BTreeMap, HashMap};

use crate::types::{DocId, Postings, TermMap};
use crate::verify::WellFormedIndex;

use super::{Query, ResultKind, Scorer, SearchResult};

pub fn search_terms(index: &WellFormedIndex, scorer: &Scorer, query: &Query) -> Vec<SearchResult> {
    let mut matches: BTreeMap<u32, HashMap<&str, i32>> = BTreeMap::new();

    for word in &query.search_terms {
        let hits = lookup(index, scorer, word);
        if hits.is_empty() {
            break;
        }
        for (postings, score) in hits {
            for doc in postings.iter() {
                let best = matches
                    .entry(doc)
                    .or_default()
                    .entry(word.as_str())
                    .or_insert(score);
                *best = (*best).max(score);
            }
        }
    }

    let required = query.search_terms.len();
    let required_long = query
        .search_terms
        .iter()
        .filter(|term| term.chars().count() > 2)
        .count();

    let mut results = Vec::new();
    for (doc, words) in matches {
        if words.len() != required && words.len() != required_long {
            continue;
        }
        let excluded = query.excluded.iter().any(|term| {
            [&index.terms, &index.titleterms]
                .iter()
                .any(|map| map.get(term).is_some_and(|postings| postings.contains(doc)))
        });
        if excluded {
            continue;
        }
        let Some(score) = words.values().copied().max() else {
            continue;
        };

        let page = index.doc(DocId(doc));
        results.push(SearchResult {
            docname: page.docname.to_string(),
            filename: page.filename.to_string(),
            title: page.title.to_string(),
            anchor: String::new(),
            description: None,
            score,
            kind: ResultKind::Text,
        });
    }
    results
}

/// Posting lists matching one term, with the score each contributes.
fn lookup<'a>(index: &'a WellFormedIndex, scorer: &Scorer, word: &str) -> Vec<(&'a Postings, i32)> {
    let maps: [(&TermMap, i32, i32); 2] = [
        (&index.terms, scorer.term, scorer.partial_term),
        (&index.titleterms, scorer.title, scorer.partial_title),
    ];

    let mut hits = Vec::new();
    for (map, exact, _) in maps {
        if let Some(postings) = map.get(word) {
            hits.push((postings, exact));
        }
    }
    if word.chars().count() > 2 {
        for (map, _, partial) in maps {
            if map.contains_key(word) {
                continue;
            }
            hits.extend(
                map.iter()
                    .filter(|(key, _)| key.contains(word))
                    .map(|(_, postings)| (postings, partial)),
            );
        }
    }
    hits
}

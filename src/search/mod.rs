// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Search over a verified index, ranked the way Sphinx's search page ranks.
//!
//! Two passes feed one result list:
//!
//! 1. **Objects**: every query token is matched against dotted API names
//!    (`objects`), scored by how much of the name it covers and the object's
//!    priority.
//! 2. **Full text**: stemmed query words are looked up in `terms` and
//!    `titleterms`, with substring fallbacks.
//!
//! The merged list is deduplicated and ordered by [`dedup::rank`].

pub mod dedup;
pub mod objects;
pub mod query;
pub mod scorer;
pub mod terms;

use serde::Serialize;
use tracing::debug;

use crate::verify::WellFormedIndex;

pub use query::Query;
pub use scorer::Scorer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultKind {
    /// A documented object (class, function, ...).
    Object,
    /// A page matched by its words.
    Text,
}

/// One search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub docname: String,
    pub filename: String,
    /// Page title, or the object's full name for object hits.
    pub title: String,
    /// Fragment without `#`; empty for page hits.
    pub anchor: String,
    /// `"<type label>, in <page title>"` for object hits.
    pub description: Option<String>,
    pub score: i32,
    pub kind: ResultKind,
}

impl SearchResult {
    /// Link target relative to the site root, Sphinx's `.html` layout.
    pub fn link(&self) -> String {
        if self.anchor.is_empty() {
            format!("{}.html", self.docname)
        } else {
            format!("{}.html#{}", self.docname, self.anchor)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchResults {
    pub results: Vec<SearchResult>,
    /// Words the result page should highlight.
    pub highlight: Vec<String>,
}

impl SearchResults {
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

pub struct Searcher<'a> {
    index: &'a WellFormedIndex,
    scorer: Scorer,
}

impl<'a> Searcher<'a> {
    pub fn new(index: &'a WellFormedIndex) -> Self {
        Self {
            index,
            scorer: Scorer::default(),
        }
    }

    pub fn with_scorer(mut self, scorer: Scorer) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn scorer(&self) -> &Scorer {
        &self.scorer
    }

    pub fn search(&self, query: &str, limit: usize) -> SearchResults {
        self.search_query(&Query::parse(query), limit)
    }

    pub fn search_query(&self, query: &Query, limit: usize) -> SearchResults {
        let mut results = Vec::new();

        for (i, term) in query.object_terms.iter().enumerate() {
            let others: Vec<&str> = query
                .object_terms
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .map(|(_, other)| other.as_str())
                .collect();
            results.extend(objects::search_objects(self.index, &self.scorer, term, &others));
        }
        let object_hits = results.len();

        results.extend(terms::search_terms(self.index, &self.scorer, query));
        debug!(
            objects = object_hits,
            text = results.len() - object_hits,
            "search candidates"
        );

        SearchResults {
            results: dedup::rank(results, limit),
            highlight: query.highlight.clone(),
        }
    }
}

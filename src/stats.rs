// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Summary numbers for `sphindex inspect`.

use std::collections::BTreeMap;

use crate::codec::dump_index;
use crate::error::Result;
use crate::types::{SearchIndex, TermMap};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexStats {
    pub documents: usize,
    pub terms: usize,
    pub titleterms: usize,
    pub objects: usize,
    /// Sum of posting lengths over `terms` and `titleterms`.
    pub postings: usize,
    /// Object count per type label, e.g. `"Python method" → 25`.
    pub objects_by_type: BTreeMap<String, usize>,
    /// Body terms found on the most pages, most frequent first.
    pub top_terms: Vec<(String, usize)>,
    /// Title terms found on the most pages.
    pub top_titleterms: Vec<(String, usize)>,
    /// Length of the canonical serialization.
    pub serialized_bytes: usize,
    /// Top-level fields this crate does not interpret.
    pub extra_fields: Vec<String>,
}

impl IndexStats {
    pub fn compute(index: &SearchIndex, top: usize) -> Result<Self> {
        let mut objects_by_type = BTreeMap::new();
        for (_, _, entry) in index.iter_objects() {
            let label = match index.objnames.get(&entry.objtype) {
                Some(objtype) => objtype.label.clone(),
                None => format!("<unknown type {}>", entry.objtype),
            };
            *objects_by_type.entry(label).or_insert(0) += 1;
        }

        Ok(IndexStats {
            documents: index.doc_count(),
            terms: index.terms.len(),
            titleterms: index.titleterms.len(),
            objects: index.object_count(),
            postings: total_postings(&index.terms) + total_postings(&index.titleterms),
            objects_by_type,
            top_terms: most_frequent(&index.terms, top),
            top_titleterms: most_frequent(&index.titleterms, top),
            serialized_bytes: dump_index(index)?.len(),
            extra_fields: index.extra.keys().cloned().collect(),
        })
    }
}

fn total_postings(terms: &TermMap) -> usize {
    terms.values().map(|postings| postings.len()).sum()
}

/// Ties broken alphabetically so the output is stable.
fn most_frequent(terms: &TermMap, top: usize) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = terms
        .iter()
        .map(|(term, postings)| (term.clone(), postings.len()))
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts.truncate(top);
    counts
}

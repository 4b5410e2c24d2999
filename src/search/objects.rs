// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Object lookup: API names whose dotted full name contains a query token.

use crate::types::{full_name, DocId};
use crate::verify::WellFormedIndex;

use super::{ResultKind, Scorer, SearchResult};

/// Every object whose lowercased full name contains `term`.
///
/// With more than one token in the query, the `others` must each occur in
/// the object's prefix, name, type label or page title.
pub fn search_objects(
    index: &WellFormedIndex,
    scorer: &Scorer,
    term: &str,
    others: &[&str],
) -> Vec<SearchResult> {
    let mut results = Vec::new();
    for (prefix, name, entry) in index.iter_objects() {
        let full = full_name(prefix, name);
        let full_lower = full.to_lowercase();
        if !full_lower.contains(term) {
            continue;
        }

        let last = full_lower.rsplit('.').next().unwrap_or(&full_lower);
        let mut score = if full_lower == term || last == term {
            scorer.obj_name_match
        } else if last.contains(term) {
            scorer.obj_partial_match
        } else {
            0
        };

        let doc = index.doc(DocId(entry.doc));
        let objtype = index.object_type(entry.objtype);
        if !others.is_empty() {
            let haystack =
                format!("{} {} {} {}", prefix, name, objtype.label, doc.title).to_lowercase();
            if !others.iter().all(|other| haystack.contains(other)) {
                continue;
            }
        }

        score += scorer.object_priority(entry.priority);
        results.push(SearchResult {
            docname: doc.docname.to_string(),
            filename: doc.filename.to_string(),
            anchor: entry.resolve_anchor(&full, Some(objtype)),
            description: Some(format!("{}, in {}", objtype.label, doc.title)),
            title: full,
            score,
            kind: ResultKind::Object,
        });
    }
    results
}

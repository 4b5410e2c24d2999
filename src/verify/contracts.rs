// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Runtime contracts for indexes this crate produces.
//!
//! Zero-cost in release builds (`debug_assert!`). The builder calls these
//! after every freeze, so a regression in the builder fails the test suite
//! instead of shipping an index the browser silently mis-reads.

use crate::types::SearchIndex;

use super::checks::verify;

/// A frozen index must pass every structural check.
#[inline]
pub fn check_index_well_formed(index: &SearchIndex) {
    if cfg!(debug_assertions) {
        let report = verify(index);
        debug_assert!(
            report.is_ok(),
            "Contract violation: frozen index is not well formed - {}",
            report
        );
    }
}

/// A frozen index uses Sphinx's canonical posting shapes: bare integers for
/// one page, sorted lists of two or more otherwise.
#[inline]
pub fn check_postings_canonical(index: &SearchIndex) {
    for (field, terms) in [("terms", &index.terms), ("titleterms", &index.titleterms)] {
        for (key, postings) in terms {
            debug_assert!(
                postings.is_canonical(),
                "Contract violation: {}[{:?}] = {:?} is not canonical",
                field,
                key,
                postings
            );
        }
    }
}

/// Parallel page arrays line up.
#[inline]
pub fn check_parallel_arrays(index: &SearchIndex) {
    debug_assert!(
        index.docnames.len() == index.filenames.len() && index.docnames.len() == index.titles.len(),
        "Contract violation: docnames {} / filenames {} / titles {}",
        index.docnames.len(),
        index.filenames.len(),
        index.titles.len()
    );
}

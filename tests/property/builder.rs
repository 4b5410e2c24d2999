//! Whatever the input, the builder produces an index that verifies.

use std::collections::BTreeSet;

use proptest::prelude::*;
use sphindex::types::priority;
use sphindex::{stemmer, verify, IndexBuilder, VerificationWarning};

use crate::strategies::{corpus_strategy, word_strategy};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_frozen_index_is_well_formed(docs in corpus_strategy()) {
        let mut builder = IndexBuilder::new();
        for doc in &docs {
            builder.feed(doc);
        }
        let index = builder.freeze();

        let report = verify(&index);
        prop_assert!(report.is_ok(), "{}", report);
        // Postings are always canonical; only type codes shadowed by a
        // redefined object may go unused.
        let only_unused_types = report
            .warnings
            .iter()
            .all(|w| matches!(w, VerificationWarning::UnusedObjectType { .. }));
        prop_assert!(only_unused_types, "{}", report);

        let unique: BTreeSet<&str> = docs.iter().map(|d| d.docname.as_str()).collect();
        prop_assert_eq!(index.docnames.len(), unique.len());
        prop_assert!(index.docnames.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn prop_hidden_objects_never_indexed(docs in corpus_strategy()) {
        let mut builder = IndexBuilder::new();
        for doc in &docs {
            builder.feed(doc);
        }
        let index = builder.freeze();
        prop_assert!(index
            .iter_objects()
            .all(|(_, _, entry)| entry.priority != priority::HIDDEN));
    }

    #[test]
    fn prop_feed_order_irrelevant(docs in corpus_strategy()) {
        // Later duplicates replace earlier ones, so keep one per docname.
        let mut seen = BTreeSet::new();
        let docs: Vec<_> = docs
            .into_iter()
            .filter(|d| seen.insert(d.docname.clone()))
            .collect();

        let mut forward = IndexBuilder::new();
        for doc in &docs {
            forward.feed(doc);
        }
        let mut backward = IndexBuilder::new();
        for doc in docs.iter().rev() {
            backward.feed(doc);
        }
        let (forward, backward) = (forward.freeze(), backward.freeze());
        prop_assert_eq!(forward.docnames, backward.docnames);
        prop_assert_eq!(forward.terms, backward.terms);
        prop_assert_eq!(forward.titleterms, backward.titleterms);
    }

    #[test]
    fn prop_removing_every_page_empties_index(docs in corpus_strategy()) {
        let mut builder = IndexBuilder::new();
        for doc in &docs {
            builder.feed(doc);
        }
        for doc in &docs {
            builder.remove(&doc.docname);
        }
        let index = builder.freeze();
        prop_assert_eq!(index.doc_count(), 0);
        prop_assert!(index.terms.is_empty());
        prop_assert!(index.titleterms.is_empty());
        prop_assert_eq!(index.object_count(), 0);
    }

    #[test]
    fn prop_stem_never_grows(word in "[a-z]{0,14}") {
        let stemmed = stemmer::stem(&word);
        prop_assert!(stemmed.len() <= word.len());
        prop_assert!(stemmed.chars().all(|c| c.is_ascii_lowercase()));
    }

    #[test]
    fn prop_stem_lowercases(word in word_strategy()) {
        let stemmed = stemmer::stem(&word);
        prop_assert_eq!(stemmed.to_lowercase(), stemmed);
    }
}

//! Search results are deduplicated, ordered and bounded.

use std::collections::HashSet;

use proptest::prelude::*;
use sphindex::search::dedup::compare_results;
use sphindex::{IndexBuilder, Searcher, WellFormedIndex};

use crate::common::sample_index;
use crate::strategies::{corpus_strategy, word_strategy};

fn query_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            4 => word_strategy(),
            1 => word_strategy().prop_map(|w| format!("-{}", w)),
            1 => prop::sample::select(vec!["runner", "sampler", "adapt", "redis", "run"])
                .prop_map(str::to_string),
        ],
        0..4,
    )
    .prop_map(|words| words.join(" "))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_results_unique_and_sorted(query in query_strategy(), limit in 0usize..12) {
        let index = sample_index();
        let results = Searcher::new(&index).search(&query, limit);

        prop_assert!(results.len() <= limit);

        let mut keys = HashSet::new();
        for hit in &results.results {
            let key = (hit.docname.clone(), hit.anchor.clone(), hit.title.clone());
            prop_assert!(keys.insert(key), "duplicate result {:?}", hit);
        }

        prop_assert!(results
            .results
            .windows(2)
            .all(|pair| compare_results(&pair[0], &pair[1]) != std::cmp::Ordering::Greater));
    }

    #[test]
    fn prop_hits_point_at_real_pages(docs in corpus_strategy(), query in query_strategy()) {
        let mut builder = IndexBuilder::new();
        for doc in &docs {
            builder.feed(doc);
        }
        let index = WellFormedIndex::new(builder.freeze()).unwrap();
        let results = Searcher::new(&index).search(&query, 50);
        for hit in &results.results {
            let id = index.doc_id(&hit.docname);
            prop_assert!(id.is_some());
            prop_assert_eq!(&index.filenames[id.unwrap().as_usize()], &hit.filename);
        }
    }

    #[test]
    fn prop_excluded_pages_never_returned_as_text(word in word_strategy()) {
        let index = sample_index();
        let query = format!("sampler -{}", word);
        let parsed = sphindex::Query::parse(&query);
        let results = Searcher::new(&index).search_query(&parsed, 20);
        for hit in results.results.iter().filter(|r| r.kind == sphindex::ResultKind::Text) {
            let id = index.doc_id(&hit.docname).unwrap().get();
            for term in &parsed.excluded {
                for map in [&index.terms, &index.titleterms] {
                    prop_assert!(!map.get(term).is_some_and(|p| p.contains(id)));
                }
            }
        }
    }
}

//! The Sphinx literal dialect reads back what it writes.

use proptest::prelude::*;
use sphindex::codec::{dumps, is_bare_key, loads};
use sphindex::{dump_index, load_index, IndexBuilder};

use crate::strategies::{corpus_strategy, value_strategy};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_value_round_trip(value in value_strategy()) {
        let text = dumps(&value);
        prop_assert_eq!(loads(&text).unwrap(), value);
    }

    #[test]
    fn prop_output_is_ascii(value in value_strategy()) {
        prop_assert!(dumps(&value).is_ascii());
    }

    #[test]
    fn prop_bare_keys_are_identifiers(key in "[A-Za-z_$0-9]{1,8}") {
        if is_bare_key(&key) {
            let first = key.chars().next().unwrap();
            prop_assert!(first.is_ascii_alphabetic() || first == '_');
        }
    }

    #[test]
    fn prop_built_index_round_trip(docs in corpus_strategy()) {
        let mut builder = IndexBuilder::new();
        for doc in &docs {
            builder.feed(doc);
        }
        let index = builder.freeze();
        let text = dump_index(&index).unwrap();
        let loaded = load_index(&text).unwrap();
        prop_assert_eq!(&loaded, &index);
        prop_assert_eq!(dump_index(&loaded).unwrap(), text);
    }
}

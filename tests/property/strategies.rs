//! Generators for documents and loosely typed values.

use proptest::prelude::*;
use serde_json::{Map, Value};
use sphindex::{Document, ObjectDef};

// ============================================================================
// WORDS AND TEXT
// ============================================================================

/// Word-like tokens, mixing case, digits, underscores and stopwords.
pub fn word_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => prop::string::string_regex("[a-z]{1,10}").unwrap(),
        1 => prop::string::string_regex("[A-Z][a-z]{1,8}").unwrap(),
        1 => prop::string::string_regex("[a-z]{2,5}_[a-z0-9]{1,4}").unwrap(),
        1 => prop::sample::select(vec![
            "the", "The", "and", "is", "of", "running", "queries", "sampler", "café", "naïve",
        ])
        .prop_map(str::to_string),
    ]
}

pub fn text_strategy(max_words: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(word_strategy(), 0..max_words).prop_map(|words| words.join(" "))
}

// ============================================================================
// DOCUMENTS
// ============================================================================

fn object_strategy() -> impl Strategy<Value = ObjectDef> {
    (
        prop::string::string_regex("[a-z]{1,6}(\\.[A-Za-z_]{1,8}){0,2}").unwrap(),
        prop::sample::select(vec!["class", "method", "function"]),
        -1i32..=2,
    )
        .prop_map(|(name, kind, priority)| ObjectDef {
            name,
            display_name: None,
            domain: "py".to_string(),
            kind: kind.to_string(),
            label: Some(format!("Python {}", kind)),
            anchor: None,
            priority,
        })
}

pub fn document_strategy() -> impl Strategy<Value = Document> {
    (
        prop::string::string_regex("[a-z]{1,6}(/[a-z]{1,6})?").unwrap(),
        text_strategy(5),
        prop::collection::vec(text_strategy(3), 0..2),
        text_strategy(30),
        prop::collection::vec(object_strategy(), 0..3),
    )
        .prop_map(|(docname, title, headings, text, objects)| Document {
            filename: format!("{}.rst", docname),
            docname,
            title,
            headings,
            text,
            objects,
        })
}

pub fn corpus_strategy() -> impl Strategy<Value = Vec<Document>> {
    prop::collection::vec(document_strategy(), 1..8)
}

// ============================================================================
// LOOSE VALUES
// ============================================================================

/// Values the Sphinx dialect can carry: no floats.
pub fn value_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        any::<String>().prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 64, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::btree_map(any::<String>(), inner, 0..6)
                .prop_map(|map| Value::Object(map.into_iter().collect::<Map<String, Value>>())),
        ]
    })
}

//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.

#![doc(hidden)]

use crate::build::{Document, ObjectDef};
use crate::types::{priority, Anchor, ObjectEntry, ObjectType, Postings, SearchIndex};
use crate::verify::WellFormedIndex;

/// A page document with no headings or objects.
pub fn make_doc(docname: &str, title: &str, text: &str) -> Document {
    Document {
        docname: docname.to_string(),
        filename: format!("{}.rst", docname),
        title: title.to_string(),
        headings: vec![],
        text: text.to_string(),
        objects: vec![],
    }
}

/// A Python object definition with default priority and anchor.
pub fn make_object(name: &str, kind: &str) -> ObjectDef {
    let label = match kind {
        "class" => "Python class",
        "method" => "Python method",
        "function" => "Python function",
        "property" => "Python property",
        _ => kind,
    };
    ObjectDef {
        name: name.to_string(),
        display_name: None,
        domain: "py".to_string(),
        kind: kind.to_string(),
        label: Some(label.to_string()),
        anchor: None,
        priority: priority::DEFAULT,
    }
}

fn entry(doc: u32, objtype: u32, priority: i32, anchor: Anchor) -> ObjectEntry {
    ObjectEntry {
        doc,
        objtype,
        priority,
        anchor,
    }
}

/// Small hand-written index shaped like a Sphinx API site.
///
/// | doc | docname    | title             |
/// |-----|------------|-------------------|
/// | 0   | `index`    | Welcome to Salmon |
/// | 1   | `random`   | Random            |
/// | 2   | `runner`   | Runner            |
/// | 3   | `samplers` | Samplers          |
pub fn sample_search_index() -> SearchIndex {
    let mut index = SearchIndex {
        docnames: ["index", "random", "runner", "samplers"].map(String::from).to_vec(),
        filenames: ["index.rst", "random.rst", "runner.rst", "samplers.rst"]
            .map(String::from)
            .to_vec(),
        titles: ["Welcome to Salmon", "Random", "Runner", "Samplers"]
            .map(String::from)
            .to_vec(),
        ..SearchIndex::default()
    };

    for (word, postings) in [
        ("adapt", Postings::Many(vec![0, 3])),
        ("docker", Postings::One(0)),
        ("queri", Postings::One(3)),
        ("redi", Postings::Many(vec![0, 2])),
        ("run", Postings::Many(vec![0, 2])),
        ("sampler", Postings::Many(vec![0, 1, 3])),
    ] {
        index.terms.insert(word.to_string(), postings);
    }
    for (word, doc) in [
        ("random", 1),
        ("runner", 2),
        ("salmon", 0),
        ("sampler", 3),
        ("welcom", 0),
    ] {
        index.titleterms.insert(word.to_string(), Postings::One(doc));
    }

    index.objnames.insert(0, ObjectType::new("py", "class", "Python class"));
    index.objnames.insert(1, ObjectType::new("py", "method", "Python method"));
    index.objtypes.insert(0, "py:class".to_string());
    index.objtypes.insert(1, "py:method".to_string());

    let objects = [
        ("salmon.backend.sampler", "Runner", entry(2, 0, 1, Anchor::FullName)),
        ("salmon.backend.sampler.Runner", "run", entry(2, 1, 1, Anchor::TypedFullName)),
        ("salmon.triplets.samplers", "Adaptive", entry(3, 0, 1, Anchor::FullName)),
        ("salmon.triplets.samplers", "Random", entry(1, 0, 1, Anchor::FullName)),
        ("salmon.triplets.samplers.Adaptive", "get_query", entry(3, 1, 0, Anchor::FullName)),
    ];
    for (prefix, name, entry) in objects {
        index
            .objects
            .entry(prefix.to_string())
            .or_default()
            .insert(name.to_string(), entry);
    }
    index
}

/// [`sample_search_index`], verified.
pub fn sample_index() -> WellFormedIndex {
    match WellFormedIndex::new(sample_search_index()) {
        Ok(index) => index,
        Err(report) => panic!("sample index is malformed: {}", report),
    }
}

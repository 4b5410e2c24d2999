// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Accumulates pages and freezes them into a [`SearchIndex`].
//!
//! Pages are keyed by docname while building; document indices only exist
//! in the frozen form, where docnames are sorted and numbered.
//!
//! # Freezing
//!
//! - A word found on one page becomes a bare index, otherwise a sorted list.
//! - Objects are visited per domain, sorted by
//!   `(full name, display name, kind, docname, anchor, priority)`. Type codes
//!   are handed out in that visiting order. Hidden objects (priority `-1`)
//!   are left out.
//! - Names are HTML-escaped and grouped by the part of the display name
//!   before its last `.`.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use tracing::debug;

use crate::language::Language;
use crate::types::{
    full_name, Anchor, EnvVersion, ObjectEntry, ObjectType, Postings, SearchIndex,
    TermMap,
};
use crate::verify::contracts;

use super::{Document, ObjectDef};

type WordMap = BTreeMap<String, BTreeSet<String>>;

#[derive(Debug, Clone, Default)]
pub struct IndexBuilder {
    language: Language,
    envversion: EnvVersion,
    titles: BTreeMap<String, String>,
    filenames: BTreeMap<String, String>,
    mapping: WordMap,
    title_mapping: WordMap,
    objects: BTreeMap<String, Vec<ObjectDef>>,
    stem_cache: HashMap<String, String>,
}

impl IndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn with_envversion(mut self, envversion: EnvVersion) -> Self {
        self.envversion = envversion;
        self
    }

    pub fn set_envversion(&mut self, envversion: EnvVersion) {
        self.envversion = envversion;
    }

    /// Start from a frozen index so unchanged pages need not be fed again.
    pub fn from_index(index: &SearchIndex) -> Self {
        let docname = |i: u32| index.docnames.get(i as usize).cloned();

        let mut builder = IndexBuilder {
            envversion: index.envversion.clone(),
            ..Self::default()
        };
        for doc in index.docs() {
            builder.titles.insert(doc.docname.to_string(), doc.title.to_string());
            builder
                .filenames
                .insert(doc.docname.to_string(), doc.filename.to_string());
        }

        let load_terms = |terms: &TermMap| -> WordMap {
            terms
                .iter()
                .map(|(word, postings)| {
                    let docs = postings.iter().filter_map(docname).collect::<BTreeSet<String>>();
                    (word.clone(), docs)
                })
                .filter(|(_, docs): &(String, BTreeSet<String>)| !docs.is_empty())
                .collect()
        };
        builder.mapping = load_terms(&index.terms);
        builder.title_mapping = load_terms(&index.titleterms);

        for (prefix, name, entry) in index.iter_objects() {
            let (Some(doc), Some(objtype)) = (docname(entry.doc), index.objnames.get(&entry.objtype))
            else {
                continue;
            };
            // Anchors are compared against escaped names when freezing.
            let escaped = full_name(prefix, name);
            let anchor = entry.resolve_anchor(&escaped, Some(objtype));
            let display = html_unescape(&escaped);
            builder.objects.entry(doc).or_default().push(ObjectDef {
                name: display.clone(),
                display_name: None,
                domain: objtype.domain.clone(),
                kind: objtype.name.clone(),
                label: Some(objtype.label.clone()),
                anchor: Some(anchor),
                priority: entry.priority,
            });
        }

        debug!(
            docs = builder.titles.len(),
            terms = builder.mapping.len(),
            "restored builder from index"
        );
        builder
    }

    pub fn doc_count(&self) -> usize {
        self.titles.len()
    }

    pub fn contains(&self, docname: &str) -> bool {
        self.titles.contains_key(docname)
    }

    pub fn docnames(&self) -> impl Iterator<Item = &str> {
        self.titles.keys().map(String::as_str)
    }

    /// Index one page. Feeding a docname again replaces the previous version.
    pub fn feed(&mut self, doc: &Document) {
        if self.contains(&doc.docname) {
            self.remove(&doc.docname);
        }
        let docname = &doc.docname;
        self.titles.insert(docname.clone(), doc.title.clone());
        self.filenames.insert(docname.clone(), doc.filename.clone());

        let language = self.language;
        let title_words = std::iter::once(&doc.title)
            .chain(&doc.headings)
            .flat_map(|text| language.split(text));
        for word in title_words {
            let stemmed = self.stem(&word);
            if language.word_filter(&stemmed) {
                insert(&mut self.title_mapping, stemmed, docname);
            } else if language.word_filter(&word) {
                insert(&mut self.title_mapping, word, docname);
            }
        }

        for word in language.split(&doc.text) {
            let mut stemmed = self.stem(&word);
            if !language.word_filter(&stemmed) && language.word_filter(&word) {
                stemmed = word;
            }
            let in_title = self
                .title_mapping
                .get(&stemmed)
                .is_some_and(|docs| docs.contains(docname));
            if language.word_filter(&stemmed) && !in_title {
                insert(&mut self.mapping, stemmed, docname);
            }
        }

        if doc.objects.is_empty() {
            self.objects.remove(docname);
        } else {
            self.objects.insert(docname.clone(), doc.objects.clone());
        }
        debug!(docname = %docname, objects = doc.objects.len(), "fed document");
    }

    /// Forget a page. Returns whether it was present.
    pub fn remove(&mut self, docname: &str) -> bool {
        let present = self.titles.remove(docname).is_some();
        self.filenames.remove(docname);
        self.objects.remove(docname);
        for words in [&mut self.mapping, &mut self.title_mapping] {
            words.retain(|_, docs| {
                docs.remove(docname);
                !docs.is_empty()
            });
        }
        present
    }

    /// Keep only the given pages.
    pub fn prune<S: AsRef<str>>(&mut self, keep: &[S]) {
        let keep: BTreeSet<&str> = keep.iter().map(AsRef::as_ref).collect();
        let before = self.titles.len();
        self.titles.retain(|docname, _| keep.contains(docname.as_str()));
        self.filenames.retain(|docname, _| keep.contains(docname.as_str()));
        self.objects.retain(|docname, _| keep.contains(docname.as_str()));
        for words in [&mut self.mapping, &mut self.title_mapping] {
            words.retain(|_, docs| {
                docs.retain(|docname| keep.contains(docname.as_str()));
                !docs.is_empty()
            });
        }
        debug!(removed = before - self.titles.len(), "pruned builder");
    }

    fn stem(&mut self, word: &str) -> String {
        if let Some(stemmed) = self.stem_cache.get(word) {
            return stemmed.clone();
        }
        let stemmed = self.language.stem(word);
        self.stem_cache.insert(word.to_string(), stemmed.clone());
        stemmed
    }

    /// Produce the serializable index.
    pub fn freeze(&self) -> SearchIndex {
        let docnames: Vec<String> = self.titles.keys().cloned().collect();
        let doc_index: HashMap<&str, u32> = self
            .titles
            .keys()
            .enumerate()
            .map(|(i, name)| (name.as_str(), i as u32))
            .collect();

        let mut index = SearchIndex {
            filenames: docnames
                .iter()
                .map(|name| self.filenames.get(name).cloned().unwrap_or_default())
                .collect(),
            titles: self.titles.values().cloned().collect(),
            docnames,
            envversion: self.envversion.clone(),
            terms: freeze_terms(&self.mapping, &doc_index),
            titleterms: freeze_terms(&self.title_mapping, &doc_index),
            ..SearchIndex::default()
        };
        self.freeze_objects(&doc_index, &mut index);

        contracts::check_parallel_arrays(&index);
        contracts::check_postings_canonical(&index);
        contracts::check_index_well_formed(&index);
        index
    }

    fn freeze_objects(&self, doc_index: &HashMap<&str, u32>, index: &mut SearchIndex) {
        let mut by_domain: BTreeMap<&str, Vec<(&str, &str, &str, &str, &str, i32, &ObjectDef)>> =
            BTreeMap::new();
        for (docname, objects) in &self.objects {
            for object in objects {
                by_domain.entry(&object.domain).or_default().push((
                    &object.name,
                    object.display_name(),
                    &object.kind,
                    docname,
                    object.anchor(),
                    object.priority,
                    object,
                ));
            }
        }

        let mut codes: HashMap<(&str, &str), u32> = HashMap::new();
        for (domain, mut objects) in by_domain {
            objects.sort_by(|a, b| (a.0, a.1, a.2, a.3, a.4, a.5).cmp(&(b.0, b.1, b.2, b.3, b.4, b.5)));
            for (name, display, kind, docname, anchor, prio, object) in objects {
                let Some(&doc) = doc_index.get(docname) else {
                    continue;
                };
                if prio < 0 {
                    continue;
                }
                let next = codes.len() as u32;
                let code = *codes.entry((domain, kind)).or_insert_with(|| {
                    index
                        .objnames
                        .insert(next, ObjectType::new(domain, kind, object.label()));
                    index.objtypes.insert(next, format!("{}:{}", domain, kind));
                    next
                });

                let escaped_name = html_escape(name);
                let escaped_display = html_escape(display);
                let (prefix, short) = match escaped_display.rfind('.') {
                    Some(dot) => (&escaped_display[..dot], &escaped_display[dot + 1..]),
                    None => ("", escaped_display.as_str()),
                };
                let anchor = if anchor == escaped_name {
                    Anchor::FullName
                } else if anchor == format!("{}-{}", kind, escaped_name) {
                    Anchor::TypedFullName
                } else {
                    Anchor::Explicit(anchor.to_string())
                };
                index.objects.entry(prefix.to_string()).or_default().insert(
                    short.to_string(),
                    ObjectEntry {
                        doc,
                        objtype: code,
                        priority: prio,
                        anchor,
                    },
                );
            }
        }
    }
}

fn insert(words: &mut WordMap, word: String, docname: &str) {
    words.entry(word).or_default().insert(docname.to_string());
}

fn freeze_terms(words: &WordMap, doc_index: &HashMap<&str, u32>) -> TermMap {
    words
        .iter()
        .filter_map(|(word, docs)| {
            let ids: Vec<u32> = docs
                .iter()
                .filter_map(|docname| doc_index.get(docname.as_str()).copied())
                .collect();
            (!ids.is_empty()).then(|| (word.clone(), Postings::from_docs(ids)))
        })
        .collect()
}

/// `html.escape` with quotes, as applied to object names.
fn html_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn html_unescape(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&amp;", "&")
}

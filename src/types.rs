// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The shape of a Sphinx search index.
//!
//! A `searchindex.js` file is one object literal with nine well-known fields.
//! Three of them are parallel arrays describing pages, the rest refer back to
//! those pages by position:
//!
//! | Field        | Rust type                                   | Refers to pages by |
//! |--------------|---------------------------------------------|--------------------|
//! | `docnames`   | `Vec<String>`                               | -                  |
//! | `filenames`  | `Vec<String>`                               | -                  |
//! | `titles`     | `Vec<String>`                               | -                  |
//! | `envversion` | [`EnvVersion`]                              | -                  |
//! | `objects`    | prefix → name → [`ObjectEntry`]             | `entry.doc`        |
//! | `objnames`   | code → [`ObjectType`]                       | -                  |
//! | `objtypes`   | code → `"domain:type"`                      | -                  |
//! | `terms`      | stem → [`Postings`]                         | every posting      |
//! | `titleterms` | stem → [`Postings`]                         | every posting      |
//!
//! # Invariants
//!
//! - `docnames.len() == filenames.len() == titles.len()`
//! - every posting and every `ObjectEntry::doc` is `< docnames.len()`
//! - every `ObjectEntry::objtype` has both an `objnames` and an `objtypes` entry
//!
//! Nothing here enforces them; run [`crate::verify`] or wrap the index in
//! [`crate::WellFormedIndex`] before handing it to code that indexes arrays.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Inverted index: word stem → pages containing it.
pub type TermMap = BTreeMap<String, Postings>;

/// Documented objects: prefix (`salmon.triplets.samplers`) → short name (`STE`) → entry.
pub type ObjectMap = BTreeMap<String, BTreeMap<String, ObjectEntry>>;

/// Field names the typed model understands. Anything else is kept in `extra`.
pub const KNOWN_FIELDS: [&str; 9] = [
    "docnames",
    "envversion",
    "filenames",
    "objects",
    "objnames",
    "objtypes",
    "terms",
    "titles",
    "titleterms",
];

// =============================================================================
// NEWTYPES
// =============================================================================

/// Position of a page in `docnames` (and the parallel `filenames`/`titles`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocId(pub u32);

impl DocId {
    /// Create a new DocId, validating it's within bounds.
    #[inline]
    pub fn new(id: u32, num_docs: usize) -> Option<Self> {
        if (id as usize) < num_docs {
            Some(DocId(id))
        } else {
            None
        }
    }

    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }

    /// Convert to usize for array indexing.
    #[inline]
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for DocId {
    fn from(id: u32) -> Self {
        DocId(id)
    }
}

impl From<DocId> for usize {
    fn from(id: DocId) -> Self {
        id.0 as usize
    }
}

// =============================================================================
// POSTINGS
// =============================================================================

/// The pages a term occurs in.
///
/// Sphinx writes a term found on exactly one page as a bare integer and
/// everything else as a sorted array, so both shapes appear in the wild.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Postings {
    One(u32),
    Many(Vec<u32>),
}

impl Postings {
    /// Canonical postings for a set of pages: sorted, deduplicated, and a
    /// bare integer when exactly one page remains.
    pub fn from_docs<I: IntoIterator<Item = u32>>(docs: I) -> Self {
        let mut docs: Vec<u32> = docs.into_iter().collect();
        docs.sort_unstable();
        docs.dedup();
        if docs.len() == 1 {
            Postings::One(docs[0])
        } else {
            Postings::Many(docs)
        }
    }

    pub fn as_slice(&self) -> &[u32] {
        match self {
            Postings::One(doc) => std::slice::from_ref(doc),
            Postings::Many(docs) => docs,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.as_slice().iter().copied()
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    pub fn contains(&self, doc: u32) -> bool {
        match self {
            Postings::One(d) => *d == doc,
            Postings::Many(docs) => docs.contains(&doc),
        }
    }

    /// Strictly increasing, i.e. sorted with no duplicates.
    pub fn is_strictly_increasing(&self) -> bool {
        self.as_slice().windows(2).all(|w| w[0] < w[1])
    }

    /// Would Sphinx have written exactly this shape?
    pub fn is_canonical(&self) -> bool {
        match self {
            Postings::One(_) => true,
            Postings::Many(docs) => docs.len() >= 2 && self.is_strictly_increasing(),
        }
    }
}

// =============================================================================
// OBJECTS
// =============================================================================

/// Search priority of a documented object.
pub mod priority {
    /// Shown above everything else.
    pub const IMPORTANT: i32 = 0;
    pub const DEFAULT: i32 = 1;
    pub const UNIMPORTANT: i32 = 2;
    /// Never written to the index.
    pub const HIDDEN: i32 = -1;
}

/// Where on the page an object's description lives.
///
/// Sphinx shortens the two common cases to save bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Anchor {
    /// `""`: the anchor is the full dotted name.
    FullName,
    /// `"-"`: the anchor is `<type name>-<full name>`.
    TypedFullName,
    Explicit(String),
}

impl Anchor {
    pub fn as_str(&self) -> &str {
        match self {
            Anchor::FullName => "",
            Anchor::TypedFullName => "-",
            Anchor::Explicit(anchor) => anchor,
        }
    }
}

impl From<String> for Anchor {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "" => Anchor::FullName,
            "-" => Anchor::TypedFullName,
            _ => Anchor::Explicit(raw),
        }
    }
}

impl From<Anchor> for String {
    fn from(anchor: Anchor) -> Self {
        match anchor {
            Anchor::Explicit(anchor) => anchor,
            other => other.as_str().to_string(),
        }
    }
}

/// One documented object: `[docindex, objtype code, priority, anchor]` on disk.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawObjectEntry", into = "RawObjectEntry")]
pub struct ObjectEntry {
    pub doc: u32,
    pub objtype: u32,
    pub priority: i32,
    pub anchor: Anchor,
}

#[derive(Serialize, Deserialize)]
struct RawObjectEntry(u32, u32, i32, String);

impl From<RawObjectEntry> for ObjectEntry {
    fn from(RawObjectEntry(doc, objtype, priority, anchor): RawObjectEntry) -> Self {
        ObjectEntry {
            doc,
            objtype,
            priority,
            anchor: anchor.into(),
        }
    }
}

impl From<ObjectEntry> for RawObjectEntry {
    fn from(entry: ObjectEntry) -> Self {
        RawObjectEntry(entry.doc, entry.objtype, entry.priority, entry.anchor.into())
    }
}

impl ObjectEntry {
    /// Expand the shortened anchor into the fragment used in result links.
    pub fn resolve_anchor(&self, full_name: &str, objtype: Option<&ObjectType>) -> String {
        match &self.anchor {
            Anchor::FullName => full_name.to_string(),
            Anchor::TypedFullName => match objtype {
                Some(objtype) => format!("{}-{}", objtype.name, full_name),
                None => full_name.to_string(),
            },
            Anchor::Explicit(anchor) => anchor.clone(),
        }
    }
}

/// `objnames` entry: `["py", "class", "Python class"]` on disk.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(String, String, String)", into = "(String, String, String)")]
pub struct ObjectType {
    pub domain: String,
    pub name: String,
    /// Human readable, e.g. "Python class".
    pub label: String,
}

impl ObjectType {
    pub fn new(domain: &str, name: &str, label: &str) -> Self {
        ObjectType {
            domain: domain.to_string(),
            name: name.to_string(),
            label: label.to_string(),
        }
    }

    /// The matching `objtypes` value, `"py:class"`.
    pub fn qualified(&self) -> String {
        format!("{}:{}", self.domain, self.name)
    }
}

impl From<(String, String, String)> for ObjectType {
    fn from((domain, name, label): (String, String, String)) -> Self {
        ObjectType { domain, name, label }
    }
}

impl From<ObjectType> for (String, String, String) {
    fn from(objtype: ObjectType) -> Self {
        (objtype.domain, objtype.name, objtype.label)
    }
}

/// Join an `objects` prefix and name back into the dotted full name.
pub fn full_name(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", prefix, name)
    }
}

// =============================================================================
// ENVIRONMENT VERSION
// =============================================================================

/// Schema versions of the environment that produced the index.
///
/// Old Sphinx releases wrote one integer; current ones write a map from
/// domain to version plus a `sphinx` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EnvVersion {
    Legacy(u64),
    Domains(BTreeMap<String, u64>),
}

impl Default for EnvVersion {
    fn default() -> Self {
        EnvVersion::Domains(BTreeMap::new())
    }
}

impl EnvVersion {
    /// The global `sphinx` environment version, if recorded.
    pub fn sphinx(&self) -> Option<u64> {
        match self {
            EnvVersion::Legacy(version) => Some(*version),
            EnvVersion::Domains(domains) => domains.get("sphinx").copied(),
        }
    }
}

// =============================================================================
// SEARCH INDEX
// =============================================================================

/// A complete `searchindex.js` payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchIndex {
    pub docnames: Vec<String>,
    pub filenames: Vec<String>,
    pub titles: Vec<String>,
    pub envversion: EnvVersion,
    pub objects: ObjectMap,
    pub objnames: BTreeMap<u32, ObjectType>,
    pub objtypes: BTreeMap<u32, String>,
    pub terms: TermMap,
    pub titleterms: TermMap,
    /// Top-level fields this crate doesn't model (`alltitles`, `indexentries`, ...).
    pub extra: BTreeMap<String, Value>,
}

/// Borrowed view of one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocRef<'a> {
    pub id: DocId,
    pub docname: &'a str,
    pub filename: &'a str,
    pub title: &'a str,
}

impl SearchIndex {
    pub fn doc_count(&self) -> usize {
        self.docnames.len()
    }

    /// Look up a page. `None` when the id is out of bounds in any of the
    /// three parallel arrays.
    pub fn doc(&self, id: DocId) -> Option<DocRef<'_>> {
        let i = id.as_usize();
        Some(DocRef {
            id,
            docname: self.docnames.get(i)?,
            filename: self.filenames.get(i)?,
            title: self.titles.get(i)?,
        })
    }

    pub fn docs(&self) -> impl Iterator<Item = DocRef<'_>> {
        (0..self.doc_count() as u32).filter_map(move |i| self.doc(DocId(i)))
    }

    pub fn doc_id(&self, docname: &str) -> Option<DocId> {
        self.docnames
            .iter()
            .position(|d| d == docname)
            .map(|i| DocId(i as u32))
    }

    /// Every object as `(prefix, name, entry)`, prefixes and names in order.
    pub fn iter_objects(&self) -> impl Iterator<Item = (&str, &str, &ObjectEntry)> {
        self.objects.iter().flat_map(|(prefix, names)| {
            names
                .iter()
                .map(move |(name, entry)| (prefix.as_str(), name.as_str(), entry))
        })
    }

    pub fn object_count(&self) -> usize {
        self.objects.values().map(BTreeMap::len).sum()
    }
}

/// Borrowing mirror of the known fields, serialized with `extra` flattened in.
#[derive(Serialize)]
struct IndexRepr<'a> {
    docnames: &'a [String],
    envversion: &'a EnvVersion,
    filenames: &'a [String],
    objects: &'a ObjectMap,
    objnames: &'a BTreeMap<u32, ObjectType>,
    objtypes: &'a BTreeMap<u32, String>,
    terms: &'a TermMap,
    titles: &'a [String],
    titleterms: &'a TermMap,
    #[serde(flatten)]
    extra: &'a BTreeMap<String, Value>,
}

impl Serialize for SearchIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        IndexRepr {
            docnames: &self.docnames,
            envversion: &self.envversion,
            filenames: &self.filenames,
            objects: &self.objects,
            objnames: &self.objnames,
            objtypes: &self.objtypes,
            terms: &self.terms,
            titles: &self.titles,
            titleterms: &self.titleterms,
            extra: &self.extra,
        }
        .serialize(serializer)
    }
}

/// Owned mirror of the known fields. `docnames`, `filenames`, `titles`,
/// `terms` and `titleterms` are required; the rest default to empty.
#[derive(Deserialize)]
struct IndexFields {
    docnames: Vec<String>,
    filenames: Vec<String>,
    titles: Vec<String>,
    #[serde(default)]
    envversion: EnvVersion,
    #[serde(default)]
    objects: ObjectMap,
    #[serde(default)]
    objnames: BTreeMap<u32, ObjectType>,
    #[serde(default)]
    objtypes: BTreeMap<u32, String>,
    terms: TermMap,
    titleterms: TermMap,
}

// `#[serde(flatten)]` buffers values and loses the ability to read integer
// map keys (`objnames`), so unknown fields are split off by hand.
impl<'de> Deserialize<'de> for SearchIndex {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut fields = Map::<String, Value>::deserialize(deserializer)?;
        let unknown: Vec<String> = fields
            .keys()
            .filter(|key| !KNOWN_FIELDS.contains(&key.as_str()))
            .cloned()
            .collect();
        let mut extra = BTreeMap::new();
        for key in unknown {
            if let Some(value) = fields.remove(&key) {
                extra.insert(key, value);
            }
        }

        let known: IndexFields =
            serde_json::from_value(Value::Object(fields)).map_err(D::Error::custom)?;

        Ok(SearchIndex {
            docnames: known.docnames,
            filenames: known.filenames,
            titles: known.titles,
            envversion: known.envversion,
            objects: known.objects,
            objnames: known.objnames,
            objtypes: known.objtypes,
            terms: known.terms,
            titleterms: known.titleterms,
            extra,
        })
    }
}

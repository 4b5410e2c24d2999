// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Violations, the report that collects them, and the wrapper that proves
//! there were none.
//!
//! | Type                 | What's Guaranteed                                  |
//! |----------------------|----------------------------------------------------|
//! | `WellFormedIndex`    | parallel arrays aligned, every doc index in bounds |
//! |                      | every object type code resolvable                  |

use std::fmt;
use std::ops::Deref;

use thiserror::Error;

use crate::types::{DocId, DocRef, ObjectType, SearchIndex};

use super::checks::verify;

/// Which part of the index a violation was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexField {
    Terms,
    TitleTerms,
    Objects,
}

impl fmt::Display for IndexField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            IndexField::Terms => "terms",
            IndexField::TitleTerms => "titleterms",
            IndexField::Objects => "objects",
        })
    }
}

/// Something a consumer would trip over.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantError {
    #[error("docnames has {docnames} entries but filenames has {filenames} and titles {titles}")]
    MismatchedLengths {
        docnames: usize,
        filenames: usize,
        titles: usize,
    },

    #[error("{field}[{key:?}] references document {index} but there are only {doc_count}")]
    DocIndexOutOfBounds {
        field: IndexField,
        key: String,
        index: u32,
        doc_count: usize,
    },

    #[error("object {full_name} uses type code {code} which has no {table} entry")]
    UnknownObjectType {
        full_name: String,
        code: u32,
        table: &'static str,
    },

    #[error("type code {code} is in {present_in} but missing from {missing_from}")]
    ObjectTypeTablesDiverge {
        code: u32,
        present_in: &'static str,
        missing_from: &'static str,
    },

    #[error("objtypes[{code}] is {objtype:?} but objnames implies {expected:?}")]
    ObjectTypeMismatch {
        code: u32,
        objtype: String,
        expected: String,
    },

    #[error("docname {docname:?} appears at positions {first} and {second}")]
    DuplicateDocname {
        docname: String,
        first: usize,
        second: usize,
    },

    #[error("{field}[{key:?}] is not strictly increasing")]
    UnsortedPostings { field: IndexField, key: String },
}

/// Harmless, but not what Sphinx itself would have written.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationWarning {
    #[error("{field}[{key:?}] has no documents")]
    EmptyPostings { field: IndexField, key: String },

    #[error("{field}[{key:?}] is a one-element list instead of a bare index")]
    SingletonList { field: IndexField, key: String },

    #[error("type code {code} is declared but no object uses it")]
    UnusedObjectType { code: u32 },
}

/// Everything [`verify`] found. Errors make the index unusable; warnings don't.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerificationReport {
    pub errors: Vec<InvariantError>,
    pub warnings: Vec<VerificationWarning>,
}

impl VerificationReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// No errors and no warnings.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

impl fmt::Display for VerificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} error(s), {} warning(s)",
            self.errors.len(),
            self.warnings.len()
        )?;
        for error in &self.errors {
            write!(f, "\n  error: {}", error)?;
        }
        for warning in &self.warnings {
            write!(f, "\n  warning: {}", warning)?;
        }
        Ok(())
    }
}

/// A search index that passed [`verify`] without errors.
///
/// Every document index it contains is in bounds and every object type code
/// resolves, so the accessors below never fail for ids taken from the index
/// itself.
#[derive(Debug, Clone, PartialEq)]
pub struct WellFormedIndex {
    inner: SearchIndex,
}

impl WellFormedIndex {
    /// Validate an index. The report is returned on failure so callers can
    /// show every problem, not just the first.
    pub fn new(index: SearchIndex) -> Result<Self, VerificationReport> {
        let report = verify(&index);
        if report.is_ok() {
            Ok(Self { inner: index })
        } else {
            Err(report)
        }
    }

    pub fn index(&self) -> &SearchIndex {
        &self.inner
    }

    pub fn into_inner(self) -> SearchIndex {
        self.inner
    }

    /// Page for an id taken from this index's postings or objects.
    ///
    /// # Panics
    /// Only for ids that did not come from this index.
    pub fn doc(&self, id: DocId) -> DocRef<'_> {
        let i = id.as_usize();
        DocRef {
            id,
            docname: &self.inner.docnames[i],
            filename: &self.inner.filenames[i],
            title: &self.inner.titles[i],
        }
    }

    /// Type of an object, by a code taken from this index's objects.
    pub fn object_type(&self, code: u32) -> &ObjectType {
        &self.inner.objnames[&code]
    }
}

impl Deref for WellFormedIndex {
    type Target = SearchIndex;

    fn deref(&self) -> &SearchIndex {
        &self.inner
    }
}

impl TryFrom<SearchIndex> for WellFormedIndex {
    type Error = VerificationReport;

    fn try_from(index: SearchIndex) -> Result<Self, Self::Error> {
        Self::new(index)
    }
}

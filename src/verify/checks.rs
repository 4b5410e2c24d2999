// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Structural checks over a parsed search index.
//!
//! Every check runs even after an earlier one failed, so a report lists all
//! problems at once. Doc indices are checked against `docnames.len()`; when
//! the parallel arrays disagree that is reported separately.

use std::collections::{BTreeSet, HashMap};

use crate::types::{full_name, Postings, SearchIndex, TermMap};

use super::types::{IndexField, InvariantError, VerificationReport, VerificationWarning};

/// Check every structural invariant of a search index.
pub fn verify(index: &SearchIndex) -> VerificationReport {
    let mut report = VerificationReport::default();

    check_parallel_arrays(index, &mut report);
    check_unique_docnames(index, &mut report);
    check_terms(IndexField::Terms, &index.terms, index.doc_count(), &mut report);
    check_terms(
        IndexField::TitleTerms,
        &index.titleterms,
        index.doc_count(),
        &mut report,
    );
    check_objects(index, &mut report);
    check_object_type_tables(index, &mut report);

    report
}

fn check_parallel_arrays(index: &SearchIndex, report: &mut VerificationReport) {
    let (docnames, filenames, titles) = (
        index.docnames.len(),
        index.filenames.len(),
        index.titles.len(),
    );
    if docnames != filenames || docnames != titles {
        report.errors.push(InvariantError::MismatchedLengths {
            docnames,
            filenames,
            titles,
        });
    }
}

fn check_unique_docnames(index: &SearchIndex, report: &mut VerificationReport) {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    for (position, docname) in index.docnames.iter().enumerate() {
        if let Some(&first) = seen.get(docname.as_str()) {
            report.errors.push(InvariantError::DuplicateDocname {
                docname: docname.clone(),
                first,
                second: position,
            });
        } else {
            seen.insert(docname, position);
        }
    }
}

fn check_terms(field: IndexField, terms: &TermMap, doc_count: usize, report: &mut VerificationReport) {
    for (key, postings) in terms {
        for doc in postings.iter() {
            if doc as usize >= doc_count {
                report.errors.push(InvariantError::DocIndexOutOfBounds {
                    field,
                    key: key.clone(),
                    index: doc,
                    doc_count,
                });
            }
        }

        if !postings.is_strictly_increasing() {
            report.errors.push(InvariantError::UnsortedPostings {
                field,
                key: key.clone(),
            });
        }

        match postings {
            Postings::Many(docs) if docs.is_empty() => {
                report.warnings.push(VerificationWarning::EmptyPostings {
                    field,
                    key: key.clone(),
                });
            }
            Postings::Many(docs) if docs.len() == 1 => {
                report.warnings.push(VerificationWarning::SingletonList {
                    field,
                    key: key.clone(),
                });
            }
            _ => {}
        }
    }
}

fn check_objects(index: &SearchIndex, report: &mut VerificationReport) {
    let doc_count = index.doc_count();
    for (prefix, name, entry) in index.iter_objects() {
        if entry.doc as usize >= doc_count {
            report.errors.push(InvariantError::DocIndexOutOfBounds {
                field: IndexField::Objects,
                key: full_name(prefix, name),
                index: entry.doc,
                doc_count,
            });
        }
        if !index.objnames.contains_key(&entry.objtype) {
            report.errors.push(InvariantError::UnknownObjectType {
                full_name: full_name(prefix, name),
                code: entry.objtype,
                table: "objnames",
            });
        }
        if !index.objtypes.contains_key(&entry.objtype) {
            report.errors.push(InvariantError::UnknownObjectType {
                full_name: full_name(prefix, name),
                code: entry.objtype,
                table: "objtypes",
            });
        }
    }
}

fn check_object_type_tables(index: &SearchIndex, report: &mut VerificationReport) {
    for (code, objtype) in &index.objnames {
        match index.objtypes.get(code) {
            Some(qualified) if *qualified != objtype.qualified() => {
                report.errors.push(InvariantError::ObjectTypeMismatch {
                    code: *code,
                    objtype: qualified.clone(),
                    expected: objtype.qualified(),
                });
            }
            Some(_) => {}
            None => report.errors.push(InvariantError::ObjectTypeTablesDiverge {
                code: *code,
                present_in: "objnames",
                missing_from: "objtypes",
            }),
        }
    }
    for code in index.objtypes.keys() {
        if !index.objnames.contains_key(code) {
            report.errors.push(InvariantError::ObjectTypeTablesDiverge {
                code: *code,
                present_in: "objtypes",
                missing_from: "objnames",
            });
        }
    }

    let used: BTreeSet<u32> = index.iter_objects().map(|(_, _, e)| e.objtype).collect();
    for code in index.objnames.keys() {
        if !used.contains(code) {
            report
                .warnings
                .push(VerificationWarning::UnusedObjectType { code: *code });
        }
    }
}

//! Verification of the Salmon fixture and of deliberately broken copies.

use crate::common::salmon_index;
use sphindex::verify::IndexField;
use sphindex::{verify, InvariantError, Postings, VerificationWarning, WellFormedIndex};

#[test]
fn test_fixture_is_clean() {
    let report = verify(&salmon_index());
    assert!(report.is_clean(), "{}", report);
    assert!(WellFormedIndex::new(salmon_index()).is_ok());
}

#[test]
fn test_dropped_title_breaks_parallel_arrays() {
    let mut index = salmon_index();
    index.titles.pop();
    let report = verify(&index);
    assert!(report.errors.contains(&InvariantError::MismatchedLengths {
        docnames: 25,
        filenames: 25,
        titles: 24,
    }));
}

#[test]
fn test_out_of_range_posting() {
    let mut index = salmon_index();
    index
        .terms
        .insert("ghost".to_string(), Postings::Many(vec![3, 25]));
    let report = verify(&index);
    assert_eq!(
        report.errors,
        vec![InvariantError::DocIndexOutOfBounds {
            field: IndexField::Terms,
            key: "ghost".to_string(),
            index: 25,
            doc_count: 25,
        }]
    );

    let err = WellFormedIndex::new(index).unwrap_err();
    assert_eq!(err.errors.len(), 1);
}

#[test]
fn test_object_with_undeclared_type() {
    let mut index = salmon_index();
    index
        .objects
        .get_mut("salmon.backend.sampler")
        .unwrap()
        .get_mut("Runner")
        .unwrap()
        .objtype = 9;
    let report = verify(&index);
    assert!(report
        .errors
        .iter()
        .any(|e| matches!(e, InvariantError::UnknownObjectType { code: 9, .. })));
}

#[test]
fn test_singleton_list_is_only_a_warning() {
    let mut index = salmon_index();
    index
        .titleterms
        .insert("lonely".to_string(), Postings::Many(vec![4]));
    let report = verify(&index);
    assert!(report.is_ok());
    assert!(!report.is_clean());
    assert_eq!(
        report.warnings,
        vec![VerificationWarning::SingletonList {
            field: IndexField::TitleTerms,
            key: "lonely".to_string(),
        }]
    );
}

#[test]
fn test_unsorted_postings() {
    let mut index = salmon_index();
    index
        .terms
        .insert("backwards".to_string(), Postings::Many(vec![5, 2]));
    let report = verify(&index);
    assert!(report.errors.contains(&InvariantError::UnsortedPostings {
        field: IndexField::Terms,
        key: "backwards".to_string(),
    }));
}

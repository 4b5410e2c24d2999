//! Shared test utilities and fixtures.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use sphindex::{load_index, SearchIndex, WellFormedIndex};

pub use sphindex::testing::{make_doc, make_object, sample_index, sample_search_index};

// ============================================================================
// FIXTURE PATHS
// ============================================================================

/// A `searchindex.js` written by Sphinx 4 for the Salmon documentation.
pub const SALMON_INDEX: &str = "data/fixtures/salmon-searchindex.js";

/// Input directories for `run_build`.
pub const BUILD_FIXTURES_DIR: &str = "data/build-fixtures";

pub fn build_fixture(name: &str) -> PathBuf {
    Path::new(BUILD_FIXTURES_DIR).join(name)
}

// ============================================================================
// CACHED FIXTURES
// ============================================================================

/// Raw fixture text, read once per test binary.
pub static SALMON_TEXT: LazyLock<String> =
    LazyLock::new(|| fs::read_to_string(SALMON_INDEX).expect("Failed to read Salmon fixture"));

static SALMON: LazyLock<SearchIndex> =
    LazyLock::new(|| load_index(&SALMON_TEXT).expect("Failed to parse Salmon fixture"));

pub fn salmon_index() -> SearchIndex {
    SALMON.clone()
}

pub fn salmon_well_formed() -> WellFormedIndex {
    WellFormedIndex::new(salmon_index()).expect("Salmon fixture should verify")
}

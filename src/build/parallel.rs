// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Parallel document loading.
//!
//! Reading and parsing the exported page JSON is the only part of a build
//! that scales with the size of the site and has no shared state, so it runs
//! on rayon's pool. Feeding the builder stays sequential.

use std::fs;
use std::path::Path;

#[cfg(feature = "parallel")]
use indicatif::ProgressBar;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
#[cfg(feature = "parallel")]
use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::debug;

use crate::error::{Error, Result};

use super::{Document, InputManifest};

/// Read and parse one document file.
pub fn load_document(input_dir: &Path, filename: &str) -> Result<Document> {
    let path = input_dir.join(filename);
    let content = fs::read_to_string(&path).map_err(|source| Error::Read {
        path: path.clone(),
        source,
    })?;
    let doc = serde_json::from_str::<Document>(&content)
        .map_err(|source| Error::Document { path, source })?;
    debug!(file = filename, docname = %doc.docname, "loaded document");
    Ok(doc)
}

/// Load every document in the manifest, in manifest order.
///
/// Fails on the first unreadable or malformed file.
#[cfg(feature = "parallel")]
pub fn load_documents(input_dir: &Path, manifest: &InputManifest) -> Result<Vec<Document>> {
    manifest
        .documents
        .par_iter()
        .map(|filename| load_document(input_dir, filename))
        .collect()
}

#[cfg(not(feature = "parallel"))]
pub fn load_documents(input_dir: &Path, manifest: &InputManifest) -> Result<Vec<Document>> {
    manifest
        .documents
        .iter()
        .map(|filename| load_document(input_dir, filename))
        .collect()
}

/// [`load_documents`] with a progress bar ticking once per file.
#[cfg(feature = "parallel")]
pub fn load_documents_with_progress(
    input_dir: &Path,
    manifest: &InputManifest,
    progress: &ProgressBar,
) -> Result<Vec<Document>> {
    let counter = AtomicUsize::new(0);
    let total = manifest.documents.len();

    manifest
        .documents
        .par_iter()
        .map(|filename| {
            let doc = load_document(input_dir, filename)?;

            let count = counter.fetch_add(1, Ordering::Relaxed) + 1;
            progress.set_position(count as u64);
            if count.is_multiple_of(10) || count == total {
                progress.set_message(format!("{}/{}", count, total));
            }
            Ok(doc)
        })
        .collect()
}

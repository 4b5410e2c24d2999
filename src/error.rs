// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Errors surfaced by the library.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::codec::ParseError;
use crate::verify::VerificationReport;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error("malformed search index: {0}")]
    Parse(#[from] ParseError),

    /// Syntactically fine, but not shaped like a search index.
    #[error("unexpected search index structure: {0}")]
    Schema(#[from] serde_json::Error),

    #[error("invalid manifest {path}: {source}")]
    Manifest {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("{path}: manifest version {version} is not supported (expected 1)")]
    ManifestVersion { path: PathBuf, version: u32 },

    #[error("invalid document {path}: {source}")]
    Document {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid scorer {path}: {source}")]
    Scorer {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("unsupported search language {0:?} (only \"en\" is available)")]
    UnsupportedLanguage(String),

    #[error("search index failed verification: {0}")]
    Invalid(VerificationReport),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

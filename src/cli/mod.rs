// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the sphindex command-line interface.
//!
//! `inspect`, `verify` and `fmt` work on an existing `searchindex.js`;
//! `search` queries it the way the Sphinx search page would; `build` writes
//! a new one from page documents; `stem` is a debugging aid for the Porter
//! stemmer.

pub mod commands;
pub mod display;
pub mod inspect;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "sphindex",
    about = "Inspect, verify, build and query Sphinx searchindex.js files",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show sizes, counts and the most common words of a search index
    Inspect {
        /// Path to searchindex.js
        file: PathBuf,

        /// How many of the most frequent terms to list
        #[arg(long, default_value = "10")]
        top: usize,
    },

    /// Check that every reference in a search index resolves
    ///
    /// Exits with status 1 when errors are found. Warnings (empty or
    /// single-element posting lists, unused object types) only fail the
    /// check with --strict.
    Verify {
        /// Path to searchindex.js
        file: PathBuf,

        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },

    /// Query a search index and display ranked results
    Search {
        /// Path to searchindex.js
        file: PathBuf,

        /// Search query; prefix a word with `-` to exclude pages containing it
        query: String,

        /// Maximum number of results to return
        #[arg(short, long, default_value = "10")]
        limit: usize,

        /// JSON file overriding the ranking weights
        ///
        /// Keys mirror Sphinx's Scorer object (objNameMatch, objPartialMatch,
        /// objPrio, objPrioDefault, title, partialTitle, term, partialTerm).
        /// Missing keys keep their defaults.
        #[arg(long, env = "SPHINDEX_SCORER")]
        scorer: Option<PathBuf>,

        /// Print results as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Build searchindex.js from a directory of page documents
    Build {
        /// Input directory containing manifest.json and document files
        #[arg(short, long)]
        input: PathBuf,

        /// Output path for searchindex.js
        #[arg(short, long)]
        output: PathBuf,

        /// Reuse the index already at the output path for pages not re-read
        #[arg(long)]
        incremental: bool,
    },

    /// Rewrite a search index in canonical Sphinx form
    Fmt {
        /// Path to searchindex.js
        file: PathBuf,

        /// Write here instead of overwriting the input
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Don't write anything; exit with status 1 if the file would change
        #[arg(long, conflicts_with = "output")]
        check: bool,
    },

    /// Print the Porter stem of each word
    Stem {
        #[arg(required = true)]
        words: Vec<String>,
    },
}

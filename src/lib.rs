// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Read, check, build and query Sphinx `searchindex.js` files.
//!
//! A Sphinx HTML build ships its whole search engine as one JavaScript file:
//! an inverted index of stemmed words, the page table, and a catalogue of
//! documented API objects. This crate models that file as typed Rust data and
//! reproduces the engine around it.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  load_index   ┌──────────────┐  verify  ┌──────────────────┐
//! │searchindex.js│──────────────▶│ SearchIndex  │─────────▶│ WellFormedIndex  │
//! │  (jsdump)    │◀──────────────│  (types.rs)  │          │ (verify/types.rs)│
//! └──────────────┘  dump_index   └──────────────┘          └────────┬─────────┘
//!                                       ▲                           │
//!                                freeze │                           ▼
//!                               ┌───────┴──────┐            ┌──────────────┐
//!     manifest.json + docs ────▶│ IndexBuilder │            │   Searcher   │
//!                               │  (build/)    │            │  (search/)   │
//!                               └──────────────┘            └──────────────┘
//! ```
//!
//! | Module     | Role                                                     |
//! |------------|----------------------------------------------------------|
//! | `types`    | The nine index fields, postings, object entries          |
//! | `codec`    | The JavaScript-literal dialect Sphinx reads and writes   |
//! | `verify`   | Structural invariants and the [`WellFormedIndex`] wrapper |
//! | `language` | Tokenizing, stopwords, word filter                        |
//! | `stemmer`  | Porter stemmer, byte-compatible with Sphinx's             |
//! | `build`    | Documents in, index out; incremental rebuilds             |
//! | `search`   | Object and full-text ranking of the Sphinx search page    |
//! | `stats`    | Counts for `sphindex inspect`                             |
//!
//! # Usage
//!
//! ```ignore
//! use sphindex::{read_index, Searcher, WellFormedIndex};
//!
//! let index = WellFormedIndex::new(read_index("_build/html/searchindex.js".as_ref())?)?;
//! for hit in Searcher::new(&index).search("sampler", 10).results {
//!     println!("{:>3}  {}  {}", hit.score, hit.title, hit.link());
//! }
//! ```

pub mod build;
pub mod codec;
pub mod error;
pub mod language;
pub mod search;
pub mod stats;
pub mod stemmer;
pub mod testing;
pub mod types;
pub mod verify;

pub use build::{run_build, BuildOptions, BuildSummary, Document, IndexBuilder, ObjectDef};
pub use codec::{dump_index, load_index, read_index, write_index, ParseError};
pub use error::{Error, Result};
pub use language::Language;
pub use search::{Query, ResultKind, Scorer, SearchResult, SearchResults, Searcher};
pub use stats::IndexStats;
pub use types::{
    full_name, Anchor, DocId, DocRef, EnvVersion, ObjectEntry, ObjectType, Postings, SearchIndex,
};
pub use verify::{verify, InvariantError, VerificationReport, VerificationWarning, WellFormedIndex};

// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for the searchindex.js reader.
//!
//! Arbitrary text must either fail with a `ParseError` or produce a value
//! that dumps and re-parses to itself. Anything that loads as a search index
//! must survive verification without panicking.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sphindex::codec::{dumps, loads};
use sphindex::{dump_index, load_index, verify};

fuzz_target!(|text: &str| {
    if let Ok(value) = loads(text) {
        let dumped = dumps(&value);
        let reparsed = loads(&dumped).expect("dumped output must parse");
        assert_eq!(reparsed, value);
    }

    if let Ok(index) = load_index(text) {
        let _ = verify(&index);
        let dumped = dump_index(&index).expect("loaded index must dump");
        let reloaded = load_index(&dumped).expect("dumped index must load");
        assert_eq!(reloaded, index);
    }
});

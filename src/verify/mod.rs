// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The verification layer: structural checks and runtime contracts.
//!
//! Two complementary approaches to catching broken indexes:
//!
//! 1. **Checks** ([`verify`]) walk a parsed index and collect every violation
//!    into a [`VerificationReport`]. [`WellFormedIndex`] wraps an index that
//!    passed, so the search engine can index arrays without bounds worries.
//!
//! 2. **Runtime contracts** that panic in debug builds when the index builder
//!    produces something Sphinx's search page would choke on.

mod checks;
pub mod contracts;
mod types;

pub use checks::verify;
pub use types::*;

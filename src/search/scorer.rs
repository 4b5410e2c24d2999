// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Ranking weights.
//!
//! The defaults are the `Scorer` object shipped with Sphinx's search page.
//! Sites can override them (the page reads `html_search_scorer`), so the
//! same overrides can be loaded here from JSON with the same camelCase keys.
//!
//! | Match                                    | Default |
//! |------------------------------------------|---------|
//! | object full name or last component       | 11      |
//! | object last component contains the term  | 6       |
//! | object priority 0 / 1 / 2                | 15 / 5 / -5 |
//! | title word                               | 15      |
//! | title word containing the term           | 7       |
//! | body word                                | 5       |
//! | body word containing the term            | 2       |

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::priority;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Scorer {
    pub obj_name_match: i32,
    pub obj_partial_match: i32,
    /// Extra score by object priority.
    pub obj_prio: BTreeMap<i32, i32>,
    /// For priorities missing from `obj_prio`.
    pub obj_prio_default: i32,
    pub title: i32,
    pub partial_title: i32,
    pub term: i32,
    pub partial_term: i32,
}

impl Default for Scorer {
    fn default() -> Self {
        Scorer {
            obj_name_match: 11,
            obj_partial_match: 6,
            obj_prio: BTreeMap::from([
                (priority::IMPORTANT, 15),
                (priority::DEFAULT, 5),
                (priority::UNIMPORTANT, -5),
            ]),
            obj_prio_default: 0,
            title: 15,
            partial_title: 7,
            term: 5,
            partial_term: 2,
        }
    }
}

impl Scorer {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| Error::Scorer {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn object_priority(&self, prio: i32) -> i32 {
        self.obj_prio.get(&prio).copied().unwrap_or(self.obj_prio_default)
    }
}

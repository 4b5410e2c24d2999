// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use crate::language::is_stopword;
use crate::stemmer::stem;

/// A parsed search box query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    /// Lowercased tokens matched against object names.
    pub object_terms: Vec<String>,
    /// Stems that every full-text hit must contain.
    pub search_terms: Vec<String>,
    /// Stems that disqualify a page (`-word`).
    pub excluded: Vec<String>,
    /// Lowercased words to highlight on the result page.
    pub highlight: Vec<String>,
}

impl Query {
    pub fn parse(text: &str) -> Self {
        let mut query = Query::default();
        for token in text.split_whitespace() {
            let lower = token.to_lowercase();
            let (excluded, word) = match lower.strip_prefix('-') {
                Some(rest) if !rest.is_empty() => (true, rest),
                _ => (false, lower.as_str()),
            };
            if !excluded {
                push_unique(&mut query.object_terms, word);
            }
            if is_stopword(word) {
                continue;
            }

            let mut stemmed = stem(word);
            // Never let the stemmer cut a real word down to one or two chars.
            if stemmed.chars().count() < 3 && word.chars().count() >= 3 {
                stemmed = word.to_string();
            }
            if excluded {
                push_unique(&mut query.excluded, &stemmed);
            } else {
                query.highlight.push(word.to_string());
                push_unique(&mut query.search_terms, &stemmed);
            }
        }
        query
    }

    pub fn is_empty(&self) -> bool {
        self.object_terms.is_empty() && self.search_terms.is_empty()
    }
}

fn push_unique(list: &mut Vec<String>, word: &str) {
    if !list.iter().any(|w| w == word) {
        list.push(word.to_string());
    }
}

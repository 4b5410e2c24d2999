// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Search language: word splitting, stopwords and stemming.
//!
//! Only English is available, matching the `en` language of Sphinx's HTML
//! builder. The same rules are applied when building an index and when
//! parsing a query, otherwise stems would not line up.

use std::borrow::Cow;
use std::collections::HashSet;
use std::sync::LazyLock;

#[cfg(feature = "unicode-normalization")]
use unicode_normalization::UnicodeNormalization;

use crate::error::{Error, Result};
use crate::stemmer;

/// English stopwords. Compared case-sensitively, so `The` is not a stopword
/// while `the` is.
pub const STOPWORDS: &[&str] = &[
    "a", "and", "are", "as", "at", "be", "but", "by", "for", "if", "in", "into", "is", "it",
    "near", "no", "not", "of", "on", "or", "such", "that", "the", "their", "then", "there",
    "these", "they", "this", "to", "was", "will", "with",
];

static STOPWORD_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOPWORDS.iter().copied().collect());

pub fn is_stopword(word: &str) -> bool {
    STOPWORD_SET.contains(word)
}

/// Keep a word in the index?
///
/// Drops stopwords (only when the word starts below U+0100) and one- or
/// two-character hiragana words. The empty word is kept.
pub fn word_filter(word: &str) -> bool {
    let Some(first) = word.chars().next() else {
        return true;
    };
    let first = first as u32;
    let short_hiragana = word.chars().count() < 3 && 12353 < first && first < 12436;
    let stopword = first < 256 && is_stopword(word);
    !(short_hiragana || stopword)
}

fn is_word_char(c: char) -> bool {
    if c.is_alphanumeric() || c == '_' {
        return true;
    }
    #[cfg(feature = "unicode-normalization")]
    {
        unicode_normalization::char::is_combining_mark(c)
    }
    #[cfg(not(feature = "unicode-normalization"))]
    {
        false
    }
}

/// NFC-normalize text so composed and decomposed spellings of a word index
/// identically. Without the `unicode-normalization` feature this is a no-op.
#[cfg(feature = "unicode-normalization")]
pub fn normalize(text: &str) -> Cow<'_, str> {
    if unicode_normalization::is_nfc(text) {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(text.nfc().collect())
    }
}

#[cfg(not(feature = "unicode-normalization"))]
pub fn normalize(text: &str) -> Cow<'_, str> {
    Cow::Borrowed(text)
}

/// Maximal runs of word characters, in order, case preserved.
pub fn split_words(text: &str) -> Vec<String> {
    let text = normalize(text);
    text.split(|c: char| !is_word_char(c))
        .filter(|w| !w.is_empty())
        .map(str::to_owned)
        .collect()
}

/// A search language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    English,
}

impl Language {
    /// Resolve a Sphinx `html_search_language` code.
    pub fn from_code(code: &str) -> Result<Self> {
        match code {
            "en" => Ok(Language::English),
            _ => Err(Error::UnsupportedLanguage(code.to_string())),
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
        }
    }

    pub fn split(self, text: &str) -> Vec<String> {
        split_words(text)
    }

    /// Lowercased stem of a word.
    pub fn stem(self, word: &str) -> String {
        match self {
            Language::English => stemmer::stem(word),
        }
    }

    pub fn word_filter(self, word: &str) -> bool {
        word_filter(word)
    }
}

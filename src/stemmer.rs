// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Porter stemmer (Porter 1980), the variant Sphinx's English search uses.
//!
//! Five rewrite steps over the measure `m` of the stem (the number of
//! vowel-consonant runs):
//! 1. Plurals and -ed/-ing suffixes
//! 2. Double suffixes: -ational → -ate, -tional → -tion, ...
//! 3. -icate → -ic, -ative → "", ...
//! 4. Remove -al, -ance, -ence, ... when m > 1
//! 5. Remove final -e and reduce -ll
//!
//! Within a step the longest matching suffix is selected first; if its
//! condition fails the step does nothing.
//!
//! ```
//! use sphindex::stemmer::stem;
//!
//! assert_eq!(stem("running"), "run");
//! assert_eq!(stem("flies"), "fli");
//! assert_eq!(stem("traditional"), "tradit");
//! ```

/// Stem one word. The word is lowercased first; anything that is not one of
/// `aeiouy` counts as a consonant, so digits, `_` and non-ASCII letters pass
/// through the rules.
/// Words of one or two characters are only lowercased.
pub fn stem(word: &str) -> String {
    let lower = word.to_lowercase();
    if lower.chars().count() <= 2 {
        return lower;
    }
    let mut stemmer = PorterStemmer {
        b: lower.chars().collect(),
    };
    stemmer.step1a();
    stemmer.step1b();
    stemmer.step1c();
    stemmer.step2();
    stemmer.step3();
    stemmer.step4();
    stemmer.step5();
    stemmer.b.into_iter().collect()
}

/// Working buffer for one word.
struct PorterStemmer {
    b: Vec<char>,
}

impl PorterStemmer {
    /// `y` counts as a consonant at the start of a word or after a vowel.
    fn is_consonant(&self, i: usize) -> bool {
        match self.b[i] {
            'a' | 'e' | 'i' | 'o' | 'u' => false,
            'y' => i == 0 || !self.is_consonant(i - 1),
            _ => true,
        }
    }

    /// Number of VC sequences in `b[..len]`.
    fn measure(&self, len: usize) -> usize {
        let mut m = 0;
        let mut i = 0;
        while i < len && self.is_consonant(i) {
            i += 1;
        }
        loop {
            while i < len && !self.is_consonant(i) {
                i += 1;
            }
            if i >= len {
                return m;
            }
            while i < len && self.is_consonant(i) {
                i += 1;
            }
            m += 1;
        }
    }

    fn has_vowel(&self, len: usize) -> bool {
        (0..len).any(|i| !self.is_consonant(i))
    }

    /// `*d`: the stem ends with a double consonant.
    fn ends_double_consonant(&self, len: usize) -> bool {
        len >= 2 && self.b[len - 1] == self.b[len - 2] && self.is_consonant(len - 1)
    }

    /// `*o`: the stem ends cvc, where the final c is not w, x or y.
    fn ends_cvc(&self, len: usize) -> bool {
        len >= 3
            && self.is_consonant(len - 3)
            && !self.is_consonant(len - 2)
            && self.is_consonant(len - 1)
            && !matches!(self.b[len - 1], 'w' | 'x' | 'y')
    }

    fn ends_with(&self, suffix: &str) -> bool {
        let n = suffix.len();
        n <= self.b.len() && self.b[self.b.len() - n..].iter().copied().eq(suffix.chars())
    }

    /// Longest suffix of `rules` the word ends with, as (stem length, replacement).
    fn longest_match<'r>(&self, rules: &[(&str, &'r str)]) -> Option<(usize, &'r str)> {
        rules
            .iter()
            .filter(|(suffix, _)| self.ends_with(suffix))
            .max_by_key(|(suffix, _)| suffix.len())
            .map(|(suffix, replacement)| (self.b.len() - suffix.len(), *replacement))
    }

    fn replace_suffix(&mut self, stem_len: usize, replacement: &str) {
        self.b.truncate(stem_len);
        self.b.extend(replacement.chars());
    }

    fn step1a(&mut self) {
        let len = self.b.len();
        if self.ends_with("sses") || self.ends_with("ies") {
            self.b.truncate(len - 2);
        } else if self.ends_with("s") && !self.ends_with("ss") {
            self.b.pop();
        }
    }

    fn step1b(&mut self) {
        let len = self.b.len();
        if self.ends_with("eed") {
            if self.measure(len - 3) > 0 {
                self.b.pop();
            }
            return;
        }
        let stem_len = if self.ends_with("ed") {
            len - 2
        } else if self.ends_with("ing") {
            len - 3
        } else {
            return;
        };
        if !self.has_vowel(stem_len) {
            return;
        }
        self.b.truncate(stem_len);

        if self.ends_with("at") || self.ends_with("bl") || self.ends_with("iz") {
            self.b.push('e');
        } else if self.ends_double_consonant(stem_len)
            && !matches!(self.b[stem_len - 1], 'l' | 's' | 'z')
        {
            self.b.pop();
        } else if self.measure(stem_len) == 1 && self.ends_cvc(stem_len) {
            self.b.push('e');
        }
    }

    fn step1c(&mut self) {
        let len = self.b.len();
        if self.ends_with("y") && self.has_vowel(len - 1) {
            self.b[len - 1] = 'i';
        }
    }

    fn step2(&mut self) {
        const RULES: &[(&str, &str)] = &[
            ("ational", "ate"),
            ("tional", "tion"),
            ("enci", "ence"),
            ("anci", "ance"),
            ("izer", "ize"),
            ("abli", "able"),
            ("alli", "al"),
            ("entli", "ent"),
            ("eli", "e"),
            ("ousli", "ous"),
            ("ization", "ize"),
            ("ation", "ate"),
            ("ator", "ate"),
            ("alism", "al"),
            ("iveness", "ive"),
            ("fulness", "ful"),
            ("ousness", "ous"),
            ("aliti", "al"),
            ("iviti", "ive"),
            ("biliti", "ble"),
        ];
        if let Some((stem_len, replacement)) = self.longest_match(RULES) {
            if self.measure(stem_len) > 0 {
                self.replace_suffix(stem_len, replacement);
            }
        }
    }

    fn step3(&mut self) {
        const RULES: &[(&str, &str)] = &[
            ("icate", "ic"),
            ("ative", ""),
            ("alize", "al"),
            ("iciti", "ic"),
            ("ical", "ic"),
            ("ful", ""),
            ("ness", ""),
        ];
        if let Some((stem_len, replacement)) = self.longest_match(RULES) {
            if self.measure(stem_len) > 0 {
                self.replace_suffix(stem_len, replacement);
            }
        }
    }

    fn step4(&mut self) {
        const RULES: &[(&str, &str)] = &[
            ("al", ""),
            ("ance", ""),
            ("ence", ""),
            ("er", ""),
            ("ic", ""),
            ("able", ""),
            ("ible", ""),
            ("ant", ""),
            ("ement", ""),
            ("ment", ""),
            ("ent", ""),
            ("ion", ""),
            ("ou", ""),
            ("ism", ""),
            ("ate", ""),
            ("iti", ""),
            ("ous", ""),
            ("ive", ""),
            ("ize", ""),
        ];
        let Some((stem_len, _)) = self.longest_match(RULES) else {
            return;
        };
        if self.measure(stem_len) <= 1 {
            return;
        }
        if self.b.len() - stem_len == 3
            && self.ends_with("ion")
            && !(stem_len > 0 && matches!(self.b[stem_len - 1], 's' | 't'))
        {
            return;
        }
        self.b.truncate(stem_len);
    }

    fn step5(&mut self) {
        let len = self.b.len();
        if self.ends_with("e") {
            let m = self.measure(len - 1);
            if m > 1 || (m == 1 && !self.ends_cvc(len - 1)) {
                self.b.pop();
            }
        }
        let len = self.b.len();
        if self.ends_with("ll") && self.measure(len) > 1 {
            self.b.pop();
        }
    }
}

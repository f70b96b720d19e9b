// src/phrases.rs
//! Candidate spam vocabulary mined from the spam corpus, for human review.
//!
//! Tokens are split on non-word characters, kept only if purely alphabetic and
//! longer than 3 characters, lowercased and deduplicated. Tokens equal to a
//! whole guard phrase are dropped. Guard phrases are mostly multi-word, so that
//! last filter rarely removes anything; it is kept token-exact on purpose.
//! Nothing here feeds back into classification.
//!
//! "Alphabetic" is the Unicode `Alphabetic` property. Combining marks such as
//! the Devanagari virama are word characters but not alphabetic, so words
//! containing them are dropped; Latin-script chat is unaffected.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

use crate::guard::Guard;

const MIN_TOKEN_CHARS: usize = 4;

static RE_NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\W+").expect("non-word regex"));

/// Deduplicated lowercase tokens. Iteration is sorted, which keeps output
/// files reproducible; callers must not rely on any ranking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhraseSet(BTreeSet<String>);

impl PhraseSet {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.0.contains(token)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

fn is_candidate(token: &str) -> bool {
    token.chars().count() >= MIN_TOKEN_CHARS && token.chars().all(char::is_alphabetic)
}

pub fn mine_phrases<S: AsRef<str>>(spam_corpus: &[S], guard: &Guard) -> PhraseSet {
    let mut set = BTreeSet::new();
    for message in spam_corpus {
        for token in RE_NON_WORD.split(message.as_ref()) {
            if is_candidate(token) {
                set.insert(token.to_lowercase());
            }
        }
    }
    set.retain(|t| !guard.is_listed_phrase(t));
    PhraseSet(set)
}

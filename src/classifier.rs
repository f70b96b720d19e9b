// src/classifier.rs
//! Per-message verdicts.
//!
//! Order:
//! 1) Guard (exclusions, then whitelist) → NOT_SPAM with score 0, nothing else evaluated
//! 2) Score = number of distinct pattern categories hit
//! 3) SPAM iff score >= threshold (inclusive)

use std::fmt;
use tracing::debug;

use crate::config::rules::RuleTable;
use crate::error::Result;
use crate::guard::{Guard, GuardHit};
use crate::patterns::PatternLibrary;
use crate::state::AdaptiveState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Spam,
    NotSpam,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Spam => f.write_str("SPAM"),
            Verdict::NotSpam => f.write_str("NOT_SPAM"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationResult {
    pub verdict: Verdict,
    pub score: u32,
    /// Category ids hit (empty when the guard fired).
    pub categories: Vec<String>,
    /// Set when the guard forced the verdict.
    pub forced_by: Option<GuardHit>,
}

impl ClassificationResult {
    pub fn is_spam(&self) -> bool {
        self.verdict == Verdict::Spam
    }
}

/// Guard + pattern library, built once and shared by reference for a run.
#[derive(Debug, Clone)]
pub struct Classifier {
    library: PatternLibrary,
    guard: Guard,
}

impl Classifier {
    pub fn new(library: PatternLibrary, guard: Guard) -> Self {
        Self { library, guard }
    }

    pub fn from_table(table: &RuleTable) -> Result<Self> {
        let (library, guard) = table.compile()?;
        Ok(Self::new(library, guard))
    }

    /// Classifier over the embedded rule table.
    pub fn builtin() -> Result<Self> {
        Self::from_table(&RuleTable::builtin()?)
    }

    pub fn library(&self) -> &PatternLibrary {
        &self.library
    }

    pub fn guard(&self) -> &Guard {
        &self.guard
    }

    /// Pure verdict for `message` at `threshold`; no state is touched.
    pub fn evaluate(&self, message: &str, threshold: u32) -> ClassificationResult {
        if let Some(hit) = self.guard.find(message) {
            debug!(
                target: "classifier",
                id = %anon_hash(message),
                list = %hit.list,
                "guard forced NOT_SPAM"
            );
            return ClassificationResult {
                verdict: Verdict::NotSpam,
                score: 0,
                categories: Vec::new(),
                forced_by: Some(hit),
            };
        }

        let categories: Vec<String> = self
            .library
            .match_categories(message)
            .into_iter()
            .map(str::to_string)
            .collect();
        let score = categories.len() as u32;
        let verdict = if score >= threshold {
            Verdict::Spam
        } else {
            Verdict::NotSpam
        };

        // Never log raw text. Only hashed id + category ids.
        debug!(
            target: "classifier",
            id = %anon_hash(message),
            score, threshold, %verdict,
            categories = ?categories
        );

        ClassificationResult {
            verdict,
            score,
            categories,
            forced_by: None,
        }
    }

    /// Verdict at the state's (frozen) threshold; the message is appended to
    /// the matching corpus.
    pub fn classify(&self, message: &str, state: &mut AdaptiveState) -> ClassificationResult {
        let result = self.evaluate(message, state.threshold());
        state.record(message, result.verdict);
        result
    }
}

/// Debug logs must not carry chat text (player handles, trade details), so a
/// message is identified by the first 6 bytes of its SHA-256, hex-encoded.
/// Identical lines share an id, which is enough to follow one across events.
pub(crate) fn anon_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    Sha256::digest(text.as_bytes())[..6]
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guard::GuardList;
    use crate::patterns::{Category, Rule};

    fn classifier() -> Classifier {
        let lib = PatternLibrary::new(vec![
            Category::new("a", "A", vec![Rule::contains("alpha"), Rule::contains("al")]),
            Category::new("b", "B", vec![Rule::regex(r"\bbeta\b").unwrap()]),
            Category::new("c", "C", vec![Rule::contains("gamma")]),
        ]);
        Classifier::new(lib, Guard::new(["alpha beta"], ["all good"]))
    }

    #[test]
    fn boundary_is_inclusive() {
        let c = classifier();
        let r = c.evaluate("alpha and beta", 2);
        assert_eq!(r.score, 2);
        assert_eq!(r.verdict, Verdict::Spam);

        let r = c.evaluate("only beta", 2);
        assert_eq!(r.score, 1);
        assert_eq!(r.verdict, Verdict::NotSpam);
    }

    #[test]
    fn guard_short_circuits_scoring() {
        let c = classifier();
        let r = c.evaluate("ALPHA BETA gamma", 1);
        assert_eq!(r.verdict, Verdict::NotSpam);
        assert_eq!(r.score, 0);
        assert!(r.categories.is_empty());
        assert_eq!(r.forced_by.unwrap().list, GuardList::Exclusion);
    }

    #[test]
    fn classify_appends_without_moving_threshold() {
        let c = classifier();
        let mut st = AdaptiveState::with_threshold(1);
        assert!(c.classify("gamma", &mut st).is_spam());
        assert!(!c.classify("nothing here", &mut st).is_spam());
        assert!(!c.classify("all good, gamma", &mut st).is_spam());
        assert_eq!(st.threshold(), 1);
        assert_eq!(st.spam_corpus(), ["gamma"]);
        assert_eq!(st.non_spam_corpus(), ["nothing here", "all good, gamma"]);
    }

    #[test]
    fn verdict_display() {
        assert_eq!(Verdict::NotSpam.to_string(), "NOT_SPAM");
        assert_eq!(Verdict::Spam.to_string(), "SPAM");
    }

    #[test]
    fn anon_hash_is_short_and_stable() {
        let a = anon_hash("hello");
        // sha256("hello") = 2cf24dba5fb0a30e...
        assert_eq!(a, "2cf24dba5fb0");
        assert_eq!(a, anon_hash("hello"));
        assert_ne!(a, anon_hash("hello!"));
    }
}

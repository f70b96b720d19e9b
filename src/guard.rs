// src/guard.rs
//! Exclusion/whitelist guard.
//!
//! Two phrase lists, both matched as case-insensitive substrings of the full
//! message. A hit on either list forces a NOT_SPAM verdict and nothing scored
//! afterwards can override it.

use std::collections::BTreeSet;
use std::fmt;

/// Which list produced a guard hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardList {
    /// In-game items/activities whose names collide with spam vocabulary.
    Exclusion,
    /// Known-legitimate phrasings.
    Whitelist,
}

impl fmt::Display for GuardList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuardList::Exclusion => f.write_str("exclusion"),
            GuardList::Whitelist => f.write_str("whitelist"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardHit {
    pub list: GuardList,
    pub phrase: String,
}

#[derive(Debug, Clone, Default)]
pub struct Guard {
    exclusions: Vec<String>,
    whitelist: Vec<String>,
}

impl Guard {
    /// Phrases are trimmed and lowercased; blanks and duplicates are dropped
    /// (an empty phrase would be contained in every message).
    pub fn new<I, J, S, T>(exclusions: I, whitelist: J) -> Self
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        Self {
            exclusions: clean_list(exclusions),
            whitelist: clean_list(whitelist),
        }
    }

    pub fn exclusions(&self) -> &[String] {
        &self.exclusions
    }

    pub fn whitelist(&self) -> &[String] {
        &self.whitelist
    }

    /// First matching phrase; exclusions are consulted before the whitelist.
    pub fn find(&self, text: &str) -> Option<GuardHit> {
        let lower = text.to_lowercase();
        let hit = |list: GuardList, phrases: &[String]| {
            phrases
                .iter()
                .find(|p| lower.contains(p.as_str()))
                .map(|p| GuardHit {
                    list,
                    phrase: p.clone(),
                })
        };
        hit(GuardList::Exclusion, &self.exclusions)
            .or_else(|| hit(GuardList::Whitelist, &self.whitelist))
    }

    pub fn should_force_non_spam(&self, text: &str) -> bool {
        self.find(text).is_some()
    }

    /// Exact (whole-phrase) membership in either list.
    pub fn is_listed_phrase(&self, candidate: &str) -> bool {
        self.exclusions
            .iter()
            .chain(self.whitelist.iter())
            .any(|p| p == candidate)
    }
}

fn clean_list<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = BTreeSet::new();
    let mut out = Vec::new();
    for it in items {
        let t = it.as_ref().trim().to_lowercase();
        if !t.is_empty() && seen.insert(t.clone()) {
            out.push(t);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guard() -> Guard {
        Guard::new(
            ["burnt food", "Grand Exchange", "  ", "burnt food"],
            ["keep them safe"],
        )
    }

    #[test]
    fn lists_are_cleaned() {
        let g = guard();
        assert_eq!(g.exclusions(), ["burnt food", "grand exchange"]);
        assert_eq!(g.whitelist(), ["keep them safe"]);
    }

    #[test]
    fn exclusion_is_case_insensitive_substring() {
        let g = guard();
        let hit = g.find("Selling at the GRAND EXCHANGE now").unwrap();
        assert_eq!(hit.list, GuardList::Exclusion);
        assert_eq!(hit.phrase, "grand exchange");
    }

    #[test]
    fn exclusion_wins_over_whitelist_in_diagnostics() {
        let g = guard();
        let hit = g.find("burnt food, keep them safe").unwrap();
        assert_eq!(hit.list, GuardList::Exclusion);
    }

    #[test]
    fn whitelist_alone_forces() {
        let g = guard();
        assert!(g.should_force_non_spam("please Keep Them Safe for me"));
        assert!(!g.should_force_non_spam("safe transfer, no ban"));
    }

    #[test]
    fn listed_phrase_is_exact() {
        let g = guard();
        assert!(g.is_listed_phrase("burnt food"));
        assert!(!g.is_listed_phrase("burnt"));
    }
}

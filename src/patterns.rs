// src/patterns.rs
//! Pattern library: categorized match rules, compiled once at startup.
//!
//! A category is "hit" when ANY of its rules matches; a message's score is the
//! number of distinct categories hit, so three advertising rules firing on the
//! same line still count once.
//!
//! Matching is case-insensitive for both rule kinds:
//! - `Rule::Contains`: plain substring containment (needle stored lowercased)
//! - `Rule::Pattern`:  regex compiled with `case_insensitive(true)`

use regex::{Regex, RegexBuilder};

/// A single compiled match rule.
#[derive(Debug, Clone)]
pub enum Rule {
    Contains(String),
    Pattern(Regex),
}

impl Rule {
    /// Case-insensitive substring rule.
    pub fn contains(needle: &str) -> Self {
        Rule::Contains(needle.to_lowercase())
    }

    /// Case-insensitive regex rule.
    pub fn regex(pattern: &str) -> Result<Self, regex::Error> {
        let re = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        Ok(Rule::Pattern(re))
    }

    pub fn is_match(&self, text: &str) -> bool {
        match self {
            Rule::Contains(needle) => text.to_lowercase().contains(needle.as_str()),
            Rule::Pattern(re) => re.is_match(text),
        }
    }
}

/// A named group of rules counted as one unit of evidence.
#[derive(Debug, Clone)]
pub struct Category {
    pub id: String,
    pub label: String,
    rules: Vec<Rule>,
}

impl Category {
    pub fn new(id: impl Into<String>, label: impl Into<String>, rules: Vec<Rule>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            rules,
        }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// True if at least one rule matches.
    pub fn is_hit(&self, text: &str) -> bool {
        self.rules.iter().any(|r| r.is_match(text))
    }
}

/// Immutable set of categories.
#[derive(Debug, Clone, Default)]
pub struct PatternLibrary {
    categories: Vec<Category>,
}

impl PatternLibrary {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Ids of the categories hit by `text`, in table order, each at most once.
    pub fn match_categories(&self, text: &str) -> Vec<&str> {
        self.categories
            .iter()
            .filter(|c| c.is_hit(text))
            .map(|c| c.id.as_str())
            .collect()
    }

    /// Number of distinct categories hit.
    pub fn score(&self, text: &str) -> u32 {
        self.categories.iter().filter(|c| c.is_hit(text)).count() as u32
    }
}

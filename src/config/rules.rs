// src/config/rules.rs
//! Rule table schema (TOML) and its one-time compilation into a
//! [`PatternLibrary`] and a [`Guard`].
//!
//! Compilation is startup-fatal: any invalid regex, empty category, or
//! duplicate category id is reported before a single message is classified.

use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::{FilterError, Result};
use crate::guard::Guard;
use crate::patterns::{Category, PatternLibrary, Rule};

/// Rule table shipped with the binary.
pub const BUILTIN_RULES: &str = include_str!("../../config/rules.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct RuleTable {
    #[serde(default)]
    pub guard: GuardCfg,
    #[serde(rename = "category", default)]
    pub categories: Vec<CategoryCfg>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GuardCfg {
    #[serde(default)]
    pub exclusions: Vec<String>,
    #[serde(default)]
    pub whitelist: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryCfg {
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
    pub rules: Vec<RuleCfg>,
}

/// Exactly one of `regex` / `contains` must be set.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleCfg {
    pub regex: Option<String>,
    pub contains: Option<String>,
}

impl RuleTable {
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_RULES)
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let table: RuleTable = toml::from_str(toml_str)?;
        Ok(table)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            FilterError::RuleConfig(format!(
                "failed to read rule table at {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Compile every category and the guard lists.
    pub fn compile(&self) -> Result<(PatternLibrary, Guard)> {
        if self.categories.is_empty() {
            return Err(FilterError::RuleConfig("no categories defined".into()));
        }

        let mut seen = HashSet::new();
        let categories = self
            .categories
            .iter()
            .map(|c| {
                if !seen.insert(c.id.as_str()) {
                    return Err(FilterError::RuleConfig(format!(
                        "duplicate category id `{}`",
                        c.id
                    )));
                }
                compile_category(c)
            })
            .collect::<Result<Vec<_>>>()?;

        let guard = Guard::new(&self.guard.exclusions, &self.guard.whitelist);
        Ok((PatternLibrary::new(categories), guard))
    }
}

fn compile_category(c: &CategoryCfg) -> Result<Category> {
    if c.rules.is_empty() {
        return Err(FilterError::RuleConfig(format!(
            "category `{}` has no rules",
            c.id
        )));
    }
    let rules = c
        .rules
        .iter()
        .map(|r| compile_rule(&c.id, r))
        .collect::<Result<Vec<_>>>()?;
    let label = c.label.clone().unwrap_or_else(|| c.id.clone());
    Ok(Category::new(c.id.clone(), label, rules))
}

fn compile_rule(category: &str, r: &RuleCfg) -> Result<Rule> {
    match (&r.regex, &r.contains) {
        (Some(pattern), None) => Rule::regex(pattern).map_err(|e| FilterError::InvalidRule {
            category: category.to_string(),
            pattern: pattern.clone(),
            source: e,
        }),
        (None, Some(needle)) if !needle.trim().is_empty() => Ok(Rule::contains(needle)),
        (None, Some(_)) => Err(FilterError::RuleConfig(format!(
            "category `{category}` has an empty `contains` rule"
        ))),
        _ => Err(FilterError::RuleConfig(format!(
            "category `{category}`: each rule needs exactly one of `regex` or `contains`"
        ))),
    }
}

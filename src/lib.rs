// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod classifier;
pub mod config;
pub mod error;
pub mod guard;
pub mod normalize;
pub mod output;
pub mod patterns;
pub mod phrases;
pub mod run;
pub mod state;
pub mod tuner;

// ---- Re-exports for stable public API ----
pub use crate::classifier::{ClassificationResult, Classifier, Verdict};
pub use crate::config::rules::RuleTable;
pub use crate::config::Settings;
pub use crate::error::{FilterError, Result};
pub use crate::guard::{Guard, GuardHit, GuardList};
pub use crate::patterns::{Category, PatternLibrary, Rule};
pub use crate::phrases::{mine_phrases, PhraseSet};
pub use crate::run::{run, RunOptions, RunReport};
pub use crate::state::AdaptiveState;
pub use crate::tuner::{tune, Adjustment};

// src/tuner.rs
//! Batch-level threshold feedback, applied once after a run.
//!
//! With S = spam corpus size and N = non-spam corpus size:
//! - S > N  → threshold + 1
//! - N > S  → max(1, threshold - 1)
//! - S == N → unchanged
//!
//! This is a coarse step across runs, not a convergent optimizer. The direction
//! (more spam seen → harder to flag next time) is kept as-is.

use std::fmt;
use tracing::info;

use crate::state::AdaptiveState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjustment {
    Tightened { from: u32, to: u32 },
    Loosened { from: u32, to: u32 },
    Unchanged { threshold: u32 },
}

impl Adjustment {
    pub fn threshold(&self) -> u32 {
        match *self {
            Adjustment::Tightened { to, .. } | Adjustment::Loosened { to, .. } => to,
            Adjustment::Unchanged { threshold } => threshold,
        }
    }
}

impl fmt::Display for Adjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Adjustment::Tightened { from, to } => write!(f, "tightened {from} -> {to}"),
            Adjustment::Loosened { from, to } => write!(f, "loosened {from} -> {to}"),
            Adjustment::Unchanged { threshold } => write!(f, "unchanged at {threshold}"),
        }
    }
}

/// Adjust `state`'s threshold from its corpus sizes.
pub fn tune(state: &mut AdaptiveState) -> Adjustment {
    let spam = state.spam_corpus().len();
    let non_spam = state.non_spam_corpus().len();
    let from = state.threshold();

    let to = if spam > non_spam {
        from.saturating_add(1)
    } else if non_spam > spam {
        from.saturating_sub(1)
    } else {
        from
    };
    state.set_threshold(to);
    let to = state.threshold();

    let adj = if to > from {
        Adjustment::Tightened { from, to }
    } else if to < from {
        Adjustment::Loosened { from, to }
    } else {
        Adjustment::Unchanged { threshold: from }
    };
    info!(spam, non_spam, adjustment = %adj, "threshold tuned");
    adj
}

// src/state.rs
//! Adaptive state persisted between runs.
//!
//! JSON shape (field names are the on-disk contract):
//! {
//!     "spam_score_threshold": 2,
//!     "spam_messages": ["..."],
//!     "non_spam_messages": ["..."]
//! }
//!
//! Lifecycle: `load` once at run start, mutate in memory, `save` once at run end.
//! The threshold is only changed by the tuner after the batch, so every message
//! in a run is judged against the previous run's threshold.
//!
//! NOTE: there is no file locking. Two runs sharing one state file race and the
//! last `save` wins. A crash mid-run loses that run's corpus additions.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tracing::{info, warn};

use crate::classifier::Verdict;
use crate::error::{FilterError, Result};

pub const DEFAULT_THRESHOLD: u32 = 2;
pub const MIN_THRESHOLD: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdaptiveState {
    #[serde(rename = "spam_score_threshold")]
    threshold: u32,
    #[serde(rename = "spam_messages", default)]
    spam_corpus: Vec<String>,
    #[serde(rename = "non_spam_messages", default)]
    non_spam_corpus: Vec<String>,
}

impl Default for AdaptiveState {
    fn default() -> Self {
        Self::with_threshold(DEFAULT_THRESHOLD)
    }
}

impl AdaptiveState {
    /// Empty corpora; threshold clamped to at least 1.
    pub fn with_threshold(threshold: u32) -> Self {
        Self {
            threshold: threshold.max(MIN_THRESHOLD),
            spam_corpus: Vec::new(),
            non_spam_corpus: Vec::new(),
        }
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Clamped to at least 1.
    pub fn set_threshold(&mut self, threshold: u32) {
        self.threshold = threshold.max(MIN_THRESHOLD);
    }

    pub fn spam_corpus(&self) -> &[String] {
        &self.spam_corpus
    }

    pub fn non_spam_corpus(&self) -> &[String] {
        &self.non_spam_corpus
    }

    /// Append `message` to the corpus matching `verdict`.
    pub fn record(&mut self, message: &str, verdict: Verdict) {
        match verdict {
            Verdict::Spam => self.spam_corpus.push(message.to_string()),
            Verdict::NotSpam => self.non_spam_corpus.push(message.to_string()),
        }
    }

    /// Parse from JSON text. A stored threshold of 0 is repaired to 1.
    pub fn from_json_str(s: &str, origin: &Path) -> Result<Self> {
        let mut st: AdaptiveState =
            serde_json::from_str(s).map_err(|e| FilterError::MalformedState {
                path: origin.to_path_buf(),
                source: e,
            })?;
        if st.threshold < MIN_THRESHOLD {
            warn!(
                path = %origin.display(),
                stored = st.threshold,
                "threshold below minimum; using {}", MIN_THRESHOLD
            );
            st.threshold = MIN_THRESHOLD;
        }
        Ok(st)
    }

    /// Load from `path`; a missing file yields the default state.
    /// A file that exists but can't be decoded is an error (left untouched).
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(s) => {
                let st = Self::from_json_str(&s, path)?;
                info!(
                    path = %path.display(),
                    threshold = st.threshold,
                    spam = st.spam_corpus.len(),
                    non_spam = st.non_spam_corpus.len(),
                    "adaptive state loaded"
                );
                Ok(st)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!(path = %path.display(), "no adaptive state yet; starting from defaults");
                Ok(Self::default())
            }
            Err(e) => Err(FilterError::Io(e)),
        }
    }

    /// Pretty JSON with 4-space indentation.
    pub fn to_json_pretty(&self) -> Result<String> {
        let mut buf = Vec::new();
        let fmt = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, fmt);
        self.serialize(&mut ser)
            .map_err(|e| FilterError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))?;
        String::from_utf8(buf)
            .map_err(|e| FilterError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
    }

    /// Write to a sibling temp file, then rename over `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = self.to_json_pretty()?;
        let tmp = path.with_extension("json.tmp");
        {
            let mut f = fs::File::create(&tmp)?;
            f.write_all(json.as_bytes())?;
            f.sync_all()?;
        }
        fs::rename(&tmp, path)?;
        info!(path = %path.display(), threshold = self.threshold, "adaptive state saved");
        Ok(())
    }
}

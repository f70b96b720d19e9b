// src/output.rs
//! Output files for a run: the flagged-spam log and the mined phrase list.
//!
//! Both names carry a `MM_DD-HH-MM` local timestamp, so two runs inside the same
//! minute write to the same files.

use chrono::{DateTime, TimeZone};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::phrases::PhraseSet;

pub const TIMESTAMP_FORMAT: &str = "%m_%d-%H-%M";
const CSV_RECORD_END: &str = "\r\n";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub spam_log: PathBuf,
    pub phrase_list: PathBuf,
}

impl OutputPaths {
    pub fn for_run<Tz>(log_dir: &Path, now: &DateTime<Tz>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let stamp = now.format(TIMESTAMP_FORMAT).to_string();
        Self {
            spam_log: log_dir.join(format!("spam_log_{stamp}.txt")),
            phrase_list: log_dir.join(format!("common_spam_phrases_{stamp}.csv")),
        }
    }
}

pub fn ensure_log_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)?;
    Ok(())
}

/// Single-column CSV, one phrase per record, records ended by CRLF as RFC 4180
/// prescribes. Tokens are purely alphabetic, so no quoting is ever needed.
pub fn write_phrase_list(path: &Path, phrases: &PhraseSet) -> Result<()> {
    let mut w = BufWriter::new(fs::File::create(path)?);
    for phrase in phrases.iter() {
        write!(w, "{phrase}{CSV_RECORD_END}")?;
    }
    w.flush()?;
    Ok(())
}

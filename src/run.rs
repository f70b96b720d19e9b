// src/run.rs
//! One batch run over a chat log.
//!
//! Order:
//! 1) load adaptive state (missing → defaults, malformed → error)
//! 2) ensure log dir, open input (missing → InputNotFound), create spam log
//! 3) normalize + classify every line at the loaded threshold
//! 4) tune threshold, mine phrases, write phrase list
//! 5) persist state (only reached when everything above succeeded)

use chrono::{DateTime, Local};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::classifier::Classifier;
use crate::error::{FilterError, Result};
use crate::normalize::normalize_line;
use crate::output::{ensure_log_dir, write_phrase_list, OutputPaths};
use crate::phrases::mine_phrases;
use crate::state::AdaptiveState;
use crate::tuner::{tune, Adjustment};

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub input: PathBuf,
    pub state_path: PathBuf,
    pub log_dir: PathBuf,
    /// Echo `Spam: <message>` to stdout for each flagged line.
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchCounts {
    pub lines: usize,
    pub spam: usize,
    pub non_spam: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub counts: BatchCounts,
    /// Threshold every line of this run was judged against.
    pub threshold_used: u32,
    pub adjustment: Adjustment,
    pub phrases: usize,
    pub outputs: OutputPaths,
}

/// Classify every line of `reader`, writing flagged messages to `spam_log`.
/// `on_spam` sees each flagged (normalized) message. `input` only labels
/// read errors.
pub fn classify_lines<R, W, F>(
    reader: R,
    input: &Path,
    classifier: &Classifier,
    state: &mut AdaptiveState,
    spam_log: &mut W,
    mut on_spam: F,
) -> Result<BatchCounts>
where
    R: BufRead,
    W: Write,
    F: FnMut(&str),
{
    let mut counts = BatchCounts::default();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| FilterError::InputRead {
            path: input.to_path_buf(),
            line: idx + 1,
            source: e,
        })?;
        let message = normalize_line(&line);
        counts.lines += 1;
        if classifier.classify(&message, state).is_spam() {
            counts.spam += 1;
            writeln!(spam_log, "{message}")?;
            on_spam(&message);
        } else {
            counts.non_spam += 1;
        }
    }
    spam_log.flush()?;
    Ok(counts)
}

pub fn run(opts: &RunOptions, classifier: &Classifier, now: DateTime<Local>) -> Result<RunReport> {
    let mut state = AdaptiveState::load(&opts.state_path)?;
    let threshold_used = state.threshold();

    ensure_log_dir(&opts.log_dir)?;
    let outputs = OutputPaths::for_run(&opts.log_dir, &now);

    let input = File::open(&opts.input).map_err(|e| FilterError::InputNotFound {
        path: opts.input.clone(),
        source: e,
    })?;
    let mut spam_log = BufWriter::new(File::create(&outputs.spam_log)?);

    info!(
        input = %opts.input.display(),
        threshold = threshold_used,
        "classifying chat log"
    );
    let verbose = opts.verbose;
    let counts = classify_lines(
        BufReader::new(input),
        &opts.input,
        classifier,
        &mut state,
        &mut spam_log,
        |m| {
            if verbose {
                println!("Spam: {m}");
            }
        },
    )?;
    drop(spam_log);
    info!(
        lines = counts.lines,
        spam = counts.spam,
        non_spam = counts.non_spam,
        spam_log = %outputs.spam_log.display(),
        "batch classified"
    );

    let adjustment = tune(&mut state);

    let phrases = mine_phrases(state.spam_corpus(), classifier.guard());
    write_phrase_list(&outputs.phrase_list, &phrases)?;
    info!(
        phrases = phrases.len(),
        path = %outputs.phrase_list.display(),
        "phrase list written"
    );

    state.save(&opts.state_path)?;

    Ok(RunReport {
        counts,
        threshold_used,
        adjustment,
        phrases: phrases.len(),
        outputs,
    })
}

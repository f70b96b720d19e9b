// src/normalize.rs
//! Chat-log line normalization.
//!
//! Chat Log plugin lines look like `12:34:56 SomeUser: message text 3`.
//! We strip the leading `HH:MM:SS <name>:` stamp and a trailing numeric suffix
//! so the classifier only ever sees the message body.

use once_cell::sync::Lazy;
use regex::Regex;

static RE_STAMP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{2}:\d{2}:\d{2}.*?:\s+").expect("stamp regex"));
static RE_TRAILING_NUM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+\d+$").expect("trailing number regex"));

/// Trim, then strip the stamp prefix and the trailing number.
pub fn normalize_line(line: &str) -> String {
    let out = RE_STAMP.replace(line.trim(), "");
    RE_TRAILING_NUM.replace(&out, "").into_owned()
}

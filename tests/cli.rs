// tests/cli.rs
//
// The binary's command surface: exit status, stderr diagnostics, `-v` echo.
// Each test runs in its own scratch directory so default paths
// (`adaptive_config.json`, `logs/`) land there.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

const CHAT_LOG: &str = "\
12:00:01 Seller: selling cheap, paypal only 3
12:00:02 Alice: anyone on paypal?
12:00:03 Bob: gz on the drop
";

fn run_cli(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_chatlog-spam-filter"))
        .args(args)
        .current_dir(cwd)
        .env_remove("SPAM_FILTER_STATE_PATH")
        .env_remove("SPAM_FILTER_LOG_DIR")
        .env_remove("SPAM_FILTER_RULES_PATH")
        .env_remove("RUST_LOG")
        .output()
        .expect("binary should start")
}

#[test]
fn missing_log_file_exits_non_zero() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_cli(dir.path(), &["nope.log"]);

    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("File 'nope.log' not found"), "stderr: {stderr}");
    assert!(!dir.path().join("adaptive_config.json").exists());
}

#[test]
fn valid_log_file_exits_zero_and_writes_state() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("chat.log"), CHAT_LOG).unwrap();

    let out = run_cli(dir.path(), &["chat.log"]);

    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert!(dir.path().join("logs").is_dir());
    assert!(dir.path().join("adaptive_config.json").is_file());

    let names: Vec<String> = fs::read_dir(dir.path().join("logs"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert!(names.iter().any(|n| n.starts_with("spam_log_") && n.ends_with(".txt")));
    assert!(names
        .iter()
        .any(|n| n.starts_with("common_spam_phrases_") && n.ends_with(".csv")));

    // quiet mode keeps stdout empty
    assert!(out.stdout.is_empty());
}

#[test]
fn verbose_echoes_flagged_lines() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("chat.log"), CHAT_LOG).unwrap();

    let out = run_cli(dir.path(), &["-v", "chat.log"]);

    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert_eq!(stdout, "Spam: selling cheap, paypal only\n");
}

#[test]
fn unreadable_line_names_file_and_line() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("chat.log"),
        b"12:00:01 Seller: selling cheap, paypal only 3\n\xff\xfe bad\n",
    )
    .unwrap();

    let out = run_cli(dir.path(), &["chat.log"]);

    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("chat.log at line 2"), "stderr: {stderr}");
    assert!(!dir.path().join("adaptive_config.json").exists());
}

#[test]
fn state_and_log_dir_flags_override_defaults() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("chat.log"), CHAT_LOG).unwrap();

    let out = run_cli(
        dir.path(),
        &["--state", "st/state.json", "--log-dir", "out", "chat.log"],
    );

    assert!(out.status.success());
    assert!(dir.path().join("st/state.json").is_file());
    assert!(dir.path().join("out").is_dir());
    assert!(!dir.path().join("logs").exists());
}

//! End-to-end tests for the `skilltrack` binary.
//!
//! Every test runs the real executable inside its own temp directory so no
//! config file, `.env` or data file from the workspace leaks in.

use std::path::Path;
use std::process::{Command, Output};

fn skilltrack(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_skilltrack"))
        .args(args)
        .current_dir(dir)
        .env_remove("SKILLTRACK_CONFIG")
        .env_remove("SKILLTRACK_BACKEND")
        .env_remove("SKILLTRACK_DATA")
        .env_remove("RUST_LOG")
        .env("SKILLTRACK_LOG", "off")
        .env("NO_COLOR", "1")
        .output()
        .expect("failed to run skilltrack")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// The short id printed for the first row of `list` output.
fn first_listed_id(list: &str) -> String {
    let row = list
        .lines()
        .map(str::trim_start)
        .find(|l| l.starts_with("[ ]") || l.starts_with("[x]"))
        .expect("no skill rows");
    row[3..].split_whitespace().next().expect("no id column").to_owned()
}

#[test]
fn first_run_seeds_default_database() {
    let dir = tempfile::tempdir().unwrap();

    let out = skilltrack(dir.path(), &["list"]);
    assert!(out.status.success());
    assert_eq!(stdout(&out).matches("[ ]").count(), 25);
    assert!(dir.path().join("data/skilltrack.db").exists());
}

#[test]
fn toggle_persists_between_runs() {
    let dir = tempfile::tempdir().unwrap();
    let list = stdout(&skilltrack(dir.path(), &["list"]));
    let id = first_listed_id(&list);

    let out = skilltrack(dir.path(), &["toggle", &id]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("(+10 pts)"));

    let stats = stdout(&skilltrack(dir.path(), &["stats"]));
    assert!(stats.contains("1/25 completed · 10 pts"));
    assert!(stats.contains("  4%"));
}

#[test]
fn add_and_list_by_category_with_json_backend() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("skills.json");
    let data = data.to_str().unwrap();

    let out = skilltrack(
        dir.path(),
        &[
            "add", "Fuzzing", "--category", "testing", "--level", "expert", "--backend", "json",
            "--data", data,
        ],
    );
    assert!(out.status.success());

    let list = stdout(&skilltrack(
        dir.path(),
        &["list", "--category", "testing", "--backend", "json", "--data", data],
    ));
    assert!(list.contains("Filter: Testing"));
    assert!(list.contains("Fuzzing"));
    assert_eq!(list.matches("[ ]").count(), 5);

    let raw = std::fs::read_to_string(data).unwrap();
    assert!(raw.contains("\"name\":\"Fuzzing\""));
}

#[test]
fn unknown_id_fails() {
    let dir = tempfile::tempdir().unwrap();
    let out = skilltrack(dir.path(), &["delete", "not-a-real-id"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("skill not found"));
}

#[test]
fn reset_without_yes_keeps_data() {
    let dir = tempfile::tempdir().unwrap();
    let id = first_listed_id(&stdout(&skilltrack(dir.path(), &["list"])));
    assert!(skilltrack(dir.path(), &["delete", &id]).status.success());

    let out = stdout(&skilltrack(dir.path(), &["reset"]));
    assert!(out.contains("reset --yes"));
    assert!(stdout(&skilltrack(dir.path(), &["stats"])).contains("0/24 completed"));

    assert!(skilltrack(dir.path(), &["reset", "--yes"]).status.success());
    assert!(stdout(&skilltrack(dir.path(), &["stats"])).contains("0/25 completed"));
}

#[test]
fn config_file_selects_backend() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("skilltrack.toml"),
        "[storage]\nbackend = \"json\"\npath = \"mine.json\"\n",
    )
    .unwrap();

    assert!(skilltrack(dir.path(), &["stats"]).status.success());
    assert!(dir.path().join("mine.json").exists());
    assert!(!dir.path().join("data").exists());
}

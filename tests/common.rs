#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub const USER: &str = "alice";

pub fn slog() -> Command {
    cargo_bin_cmd!("servicelog")
}

/// `servicelog --db <db> --test --user alice ...`
pub fn slog_as(db_path: &str, user: &str) -> Command {
    let mut cmd = slog();
    cmd.args(["--db", db_path, "--test", "--user", user]);
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_servicelog.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

pub fn init_db(db_path: &str) {
    slog()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

pub fn add_entry(db_path: &str, title: &str, date: &str, duration: &str, category: &str) {
    slog_as(db_path, USER)
        .args([
            "add",
            "--title",
            title,
            "--org",
            "Local Pantry",
            "--desc",
            "Sorting donations",
            "--date",
            date,
            "--start",
            "10:00",
            "--duration",
            duration,
            "--category",
            category,
        ])
        .assert()
        .success();
}

/// Initialize DB and add a small dataset useful for many tests
pub fn init_db_with_data(db_path: &str) {
    init_db(db_path);
    add_entry(db_path, "Food Drive", "2025-03-10", "90", "community-service");
    add_entry(db_path, "Beach Cleanup", "2025-04-02", "2h", "environment");
    add_entry(db_path, "Reading Buddies", "2025-04-20", "45m", "education");
}

/// Short ids shown by `list`, in display order.
pub fn listed_ids(db_path: &str) -> Vec<String> {
    let out = slog_as(db_path, USER)
        .args(["list"])
        .output()
        .expect("run list");
    let stdout = String::from_utf8_lossy(&out.stdout).to_string();

    stdout
        .lines()
        .skip(2) // header + separator
        .take_while(|l| !l.trim().is_empty())
        .filter_map(|l| l.split_whitespace().next().map(str::to_string))
        .collect()
}

#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn hcal() -> Command {
    cargo_bin_cmd!("holical")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_holical.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Temporary output file path inside tempdir, removed if it already exists
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_holical_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Run `holical --db <db> <args...>` and expect success
pub fn ok(db_path: &str, args: &[&str]) -> String {
    let out = hcal()
        .arg("--db")
        .arg(db_path)
        .args(args)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    String::from_utf8_lossy(&out).to_string()
}

/// Resolve a calendar and parse the JSON output
pub fn resolve_json(db_path: &str, owner_flag: &[&str], year: &str) -> serde_json::Value {
    let mut args = vec!["resolve", "--year", year, "--json"];
    args.extend_from_slice(owner_flag);
    let out = ok(db_path, &args);
    serde_json::from_str(&out).expect("resolve --json prints JSON")
}

/// The `infos` row with the given holiday name
pub fn row<'a>(calendar: &'a serde_json::Value, name: &str) -> Option<&'a serde_json::Value> {
    calendar["infos"]
        .as_array()?
        .iter()
        .find(|v| v["source"]["name"] == name)
}

/// Fresh database with the reference organization:
///
/// - head office #1 "A"
/// - franchise #1 "A-가맹" under A
/// - store #1 "A-강남점" and store #2 "A-역삼점" directly under A
/// - store #3 "A-가맹-1호점" under franchise #1
/// - legal holiday #1 "어린이날" (2025-05-05)
/// - head office holiday #2 "창립기념일" (2025-05-10, closed, ALL_HEAD_OFFICE_STORES)
pub fn init_scenario(db_path: &str) {
    ok(db_path, &["--test", "init"]);

    ok(db_path, &["org", "head-office", "A"]);
    ok(db_path, &["org", "franchise", "--head-office", "1", "A-가맹"]);
    ok(db_path, &["org", "store", "--head-office", "1", "A-강남점"]);
    ok(db_path, &["org", "store", "--head-office", "1", "A-역삼점"]);
    ok(
        db_path,
        &["org", "store", "--head-office", "1", "--franchise", "1", "A-가맹-1호점"],
    );

    ok(
        db_path,
        &[
            "holiday", "add", "--year", "2025", "--owner-type", "legal", "--name", "어린이날",
            "--start", "2025-05-05",
        ],
    );
    ok(
        db_path,
        &[
            "holiday",
            "add",
            "--year",
            "2025",
            "--owner-type",
            "head-office",
            "--owner-id",
            "1",
            "--name",
            "창립기념일",
            "--start",
            "2025-05-10",
            "--apply",
            "all-head-office-stores",
        ],
    );
}

/// Write a save bundle to a temp file and return its path
pub fn bundle_file(name: &str, json: &str) -> String {
    let p = temp_out(name, "json");
    fs::write(&p, json).expect("write bundle");
    p
}

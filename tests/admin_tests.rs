use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::path::Path;

mod common;
use common::{hcal, init_scenario, ok, setup_test_db, temp_out};

#[test]
fn test_init_runs_migrations() {
    let db_path = setup_test_db("admin_init");

    hcal()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));

    hcal()
        .args(["--db", &db_path, "log", "--print", "--op", "migration_applied"])
        .assert()
        .success()
        .stdout(contains("migration_applied"));

    // running it twice is harmless
    ok(&db_path, &["--test", "init"]);
}

#[test]
fn test_db_check_and_info() {
    let db_path = setup_test_db("admin_db");
    init_scenario(&db_path);

    hcal()
        .args(["--db", &db_path, "db", "--check", "--info"])
        .assert()
        .success()
        .stdout(contains("Integrity check passed").and(contains("Migrations:")));
}

#[test]
fn test_log_records_saves_and_org_changes() {
    let db_path = setup_test_db("admin_log");
    init_scenario(&db_path);

    hcal()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("save").and(contains("org")).and(contains("inserted=1")));
}

#[test]
fn test_backup_and_compress() {
    let db_path = setup_test_db("admin_backup");
    init_scenario(&db_path);

    let plain = temp_out("admin_backup", "sqlite");
    ok(&db_path, &["backup", "--file", &plain]);
    assert!(Path::new(&plain).exists());

    let zipped = temp_out("admin_backup_zip", "sqlite");
    let zip_path = Path::new(&zipped).with_extension("zip");
    std::fs::remove_file(&zip_path).ok();
    ok(&db_path, &["backup", "--file", &zipped, "--compress"]);
    assert!(zip_path.exists());
    assert!(!Path::new(&zipped).exists());

    // the copy resolves like the original
    hcal()
        .args(["--db", &plain, "resolve", "--year", "2025", "--store", "1"])
        .assert()
        .success()
        .stdout(contains("창립기념일"));
}

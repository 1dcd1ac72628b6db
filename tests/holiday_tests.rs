use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{bundle_file, hcal, init_scenario, ok, resolve_json, row, setup_test_db};

#[test]
fn test_end_before_start_is_rejected() {
    let db_path = setup_test_db("hol_end_before_start");
    init_scenario(&db_path);

    hcal()
        .args([
            "--db",
            &db_path,
            "holiday",
            "add",
            "--year",
            "2025",
            "--owner-type",
            "head-office",
            "--owner-id",
            "1",
            "--name",
            "거꾸로",
            "--start",
            "2025-08-10",
            "--end",
            "2025-08-01",
        ])
        .assert()
        .failure()
        .stderr(contains("end date is before start date"));

    let hq = resolve_json(&db_path, &["--head-office", "1"], "2025");
    assert!(row(&hq, "거꾸로").is_none());
}

#[test]
fn test_store_holiday_cannot_cascade() {
    let db_path = setup_test_db("hol_store_apply");
    init_scenario(&db_path);

    hcal()
        .args([
            "--db",
            &db_path,
            "holiday",
            "add",
            "--year",
            "2025",
            "--owner-type",
            "store",
            "--owner-id",
            "1",
            "--name",
            "점포 휴무",
            "--start",
            "2025-07-01",
            "--apply",
            "all-head-office-stores",
        ])
        .assert()
        .failure()
        .stderr(contains("store holidays cannot cascade"));
}

#[test]
fn test_period_round_trip() {
    let db_path = setup_test_db("hol_period");
    init_scenario(&db_path);

    ok(
        &db_path,
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
            "여름 휴가",
            "--start",
            "2025-08-01",
            "--end",
            "2025-08-05",
        ],
    );

    let hq = resolve_json(&db_path, &["--head-office", "1"], "2025");
    let summer = row(&hq, "여름 휴가").unwrap();
    assert_eq!(summer["source"]["hasPeriod"], true);
    assert_eq!(summer["source"]["startDate"], "2025-08-01");
    assert_eq!(summer["source"]["endDate"], "2025-08-05");

    let founding = row(&hq, "창립기념일").unwrap();
    assert_eq!(founding["source"]["hasPeriod"], false);
    assert!(founding["source"]["endDate"].is_null());
}

#[test]
fn test_single_day_bundle_drops_end_date() {
    let db_path = setup_test_db("hol_bundle_no_period");
    init_scenario(&db_path);

    let file = bundle_file(
        "hol_bundle_no_period",
        r#"{"ownerType":"STORE","ownerId":2,"year":2025,
            "holidayInfos":[{"name":"재고 조사","hasPeriod":false,
                             "startDate":"2025-09-01","endDate":"2025-09-03"}]}"#,
    );
    ok(&db_path, &["holiday", "save", "--file", &file]);

    let yeoksam = resolve_json(&db_path, &["--store", "2"], "2025");
    let stock = row(&yeoksam, "재고 조사").unwrap();
    assert!(stock["source"]["endDate"].is_null());
}

#[test]
fn test_delete_requires_matching_owner_type() {
    let db_path = setup_test_db("hol_del_owner");
    init_scenario(&db_path);

    hcal()
        .args(["--db", &db_path, "holiday", "del", "--owner-type", "store", "--id", "2", "--yes"])
        .assert()
        .failure()
        .stderr(contains("not owned by STORE"));
}

#[test]
fn test_delete_cascades_to_store_overrides() {
    let db_path = setup_test_db("hol_del_cascade");
    init_scenario(&db_path);

    ok(&db_path, &["override", "--store", "1", "--holiday", "2", "--open"]);

    hcal()
        .args([
            "--db",
            &db_path,
            "holiday",
            "del",
            "--owner-type",
            "head-office",
            "--id",
            "2",
            "--yes",
        ])
        .assert()
        .success()
        .stdout(contains("1 override(s) removed"));

    let gangnam = resolve_json(&db_path, &["--store", "1"], "2025");
    assert!(row(&gangnam, "창립기념일").is_none());

    hcal()
        .args(["--db", &db_path, "db", "--info"])
        .assert()
        .success()
        .stdout(contains("Store overrides:").and(contains("Holidays:")));
}

#[test]
fn test_delete_without_confirmation_is_cancelled() {
    let db_path = setup_test_db("hol_del_cancel");
    init_scenario(&db_path);

    hcal()
        .args(["--db", &db_path, "holiday", "del", "--owner-type", "legal", "--id", "1"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("Operation cancelled"));

    let legal = resolve_json(&db_path, &[], "2025");
    assert!(row(&legal, "어린이날").is_some());
}

#[test]
fn test_stale_revision_is_rejected() {
    let db_path = setup_test_db("hol_stale");
    init_scenario(&db_path);

    // head office 1 was saved once by init_scenario: revision 1
    let file = bundle_file(
        "hol_stale",
        r#"{"ownerType":"HEAD_OFFICE","ownerId":1,"year":2025,"expectedRevision":0,
            "holidayInfos":[]}"#,
    );

    hcal()
        .args(["--db", &db_path, "holiday", "save", "--file", &file])
        .assert()
        .failure()
        .stderr(contains("expected revision 0, found 1"));

    let hq = resolve_json(&db_path, &["--head-office", "1"], "2025");
    assert!(row(&hq, "창립기념일").is_some());
    assert_eq!(hq["revision"], 1);
}

#[test]
fn test_full_set_save_replaces_owner_rows() {
    let db_path = setup_test_db("hol_full_set");
    init_scenario(&db_path);

    let file = bundle_file(
        "hol_full_set",
        r#"{"ownerType":"HEAD_OFFICE","ownerId":1,"year":2025,"expectedRevision":1,
            "holidayInfos":[
              {"id":2,"name":"창립기념일","startDate":"2025-05-10","isOperating":true,
               "applyChildTypes":["ALL_HEAD_OFFICE_STORES"]},
              {"name":"송년회","startDate":"2025-12-30"}]}"#,
    );

    hcal()
        .args(["--db", &db_path, "holiday", "save", "--file", &file])
        .assert()
        .success()
        .stdout(contains("1 inserted, 1 updated, 0 deleted"));

    let gangnam = resolve_json(&db_path, &["--store", "1"], "2025");
    let founding = row(&gangnam, "창립기념일").unwrap();
    assert_eq!(founding["effectiveIsOperating"], true);
    // 송년회 does not cascade
    assert!(row(&gangnam, "송년회").is_none());

    let hq = resolve_json(&db_path, &["--head-office", "1"], "2025");
    assert!(row(&hq, "송년회").is_some());
    assert_eq!(hq["revision"], 2);
}

#[test]
fn test_bad_override_rolls_back_whole_bundle() {
    let db_path = setup_test_db("hol_atomic");
    init_scenario(&db_path);

    let file = bundle_file(
        "hol_atomic",
        r#"{"ownerType":"STORE","ownerId":1,"year":2025,
            "holidayInfos":[{"name":"내부 공사","startDate":"2025-03-03"}],
            "parentHolidaySettings":[
              {"holidaySourceType":"BRANCH","holidaySourceId":2,"isOperating":true},
              {"holidaySourceType":"BRANCH","holidaySourceId":999,"isOperating":true}]}"#,
    );

    hcal()
        .args(["--db", &db_path, "holiday", "save", "--file", &file])
        .assert()
        .failure()
        .stderr(contains("does not inherit holiday 999"));

    let gangnam = resolve_json(&db_path, &["--store", "1"], "2025");
    assert!(row(&gangnam, "내부 공사").is_none());
    assert_eq!(row(&gangnam, "창립기념일").unwrap()["effectiveIsOperating"], false);
    assert_eq!(gangnam["revision"], 0);
}

#[test]
fn test_override_source_type_must_match_level() {
    let db_path = setup_test_db("hol_source_type");
    init_scenario(&db_path);

    // holiday 1 is a legal holiday, not a BRANCH one
    let file = bundle_file(
        "hol_source_type",
        r#"{"ownerType":"STORE","ownerId":1,"year":2025,
            "parentHolidaySettings":[
              {"holidaySourceType":"BRANCH","holidaySourceId":1,"isOperating":true}]}"#,
    );

    hcal()
        .args(["--db", &db_path, "holiday", "save", "--file", &file])
        .assert()
        .failure()
        .stderr(contains("is a LEGAL source"));
}

#[test]
fn test_save_for_unknown_owner_fails() {
    let db_path = setup_test_db("hol_unknown_owner");
    init_scenario(&db_path);

    hcal()
        .args([
            "--db",
            &db_path,
            "holiday",
            "add",
            "--year",
            "2025",
            "--owner-type",
            "store",
            "--owner-id",
            "77",
            "--name",
            "유령",
            "--start",
            "2025-01-02",
        ])
        .assert()
        .failure()
        .stderr(contains("Unknown store id 77"));
}

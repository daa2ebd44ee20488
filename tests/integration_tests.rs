mod common;

use common::{dec, init_cli_db, rpc, setup_test_db};
use predicates::str::contains;
use serde_json::Value;

/// Run a command against `db_path` and return its stdout.
fn run_ok(db_path: &str, args: &[&str]) -> String {
    let mut full = vec!["--db", db_path, "--test"];
    full.extend_from_slice(args);

    let out = rpc().args(&full).output().expect("run rpayclock");
    assert!(
        out.status.success(),
        "command {:?} failed: {}",
        args,
        String::from_utf8_lossy(&out.stderr)
    );
    String::from_utf8_lossy(&out.stdout).to_string()
}

fn json(db_path: &str, args: &[&str]) -> Value {
    serde_json::from_str(run_ok(db_path, args).trim()).expect("valid JSON on stdout")
}

fn seed_instructor(db_path: &str) {
    run_ok(
        db_path,
        &["employee", "add", "EMP-001", "Ana García", "--offer", "accepted", "--holiday-list", "ES"],
    );
    run_ok(db_path, &["course", "assign", "EMP-001", "CUR-01", "--rate", "20", "--doc", "HR-OFF-0001"]);
    run_ok(db_path, &["course", "slot", "CUR-01", "--date", "2025-03-03", "--range", "09:00-13:00"]);
    run_ok(
        db_path,
        &[
            "course", "slot", "CUR-01", "--date", "2025-03-04", "--range", "09:00-11:00", "--range",
            "15:00-17:00",
        ],
    );
}

#[test]
fn test_init_creates_database() {
    let db_path = setup_test_db("it_init");

    rpc()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));

    assert!(std::path::Path::new(&db_path).exists());
}

#[test]
fn test_employee_add_and_list() {
    let db_path = setup_test_db("it_employee");
    init_cli_db(&db_path);

    rpc()
        .args(["--db", &db_path, "--test", "employee", "add", "EMP-001", "Ana García"])
        .assert()
        .success()
        .stdout(contains("Employee EMP-001 (Ana García) created."));

    rpc()
        .args(["--db", &db_path, "--test", "employee", "list"])
        .assert()
        .success()
        .stdout(contains("EMP-001"));
}

#[test]
fn test_punches_and_anomalies_json() {
    let db_path = setup_test_db("it_anomalies");
    init_cli_db(&db_path);
    seed_instructor(&db_path);

    run_ok(&db_path, &["holiday", "add", "ES", "2025-03-19", "--description", "San José"]);
    for (date, time, kind) in [
        ("2025-03-18", "09:00", "in"),
        ("2025-03-19", "09:00", "in"),
        ("2025-03-19", "11:00", "out"),
    ] {
        run_ok(
            &db_path,
            &["punch", "add", "EMP-001", "--date", date, "--time", time, "--kind", kind],
        );
    }

    let v = json(
        &db_path,
        &[
            "anomalies", "--from", "2025-03-01", "--to", "2025-03-31", "--json", "--today",
            "2025-04-01",
        ],
    );

    let found = v.as_array().expect("array");
    assert_eq!(found.len(), 2);
    assert_eq!(found[0]["type"], "MissingPunch");
    assert_eq!(found[0]["severity"], "High");
    assert_eq!(found[0]["date"], "2025-03-18");
    assert_eq!(found[1]["type"], "WorkOnHoliday");
    assert_eq!(found[1]["employee_name"], "Ana García");
}

#[test]
fn test_bad_punch_kind_is_rejected() {
    let db_path = setup_test_db("it_bad_kind");
    init_cli_db(&db_path);
    run_ok(&db_path, &["employee", "add", "EMP-001", "Ana"]);

    rpc()
        .args([
            "--db", &db_path, "--test", "punch", "add", "EMP-001", "--date", "2025-03-18", "--time",
            "09:00", "--kind", "sideways",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid punch type"));
}

#[test]
fn test_report_and_verify() {
    let db_path = setup_test_db("it_report");
    init_cli_db(&db_path);
    run_ok(&db_path, &["employee", "add", "EMP-001", "Ana"]);
    run_ok(&db_path, &["punch", "add", "EMP-001", "--date", "2025-03-03", "--time", "09:00", "--kind", "in"]);
    run_ok(&db_path, &["punch", "add", "EMP-001", "--date", "2025-03-03", "--time", "13:30", "--kind", "out"]);

    let v = json(
        &db_path,
        &["report", "-e", "EMP-001", "--from", "2025-03-03", "--to", "2025-03-04", "--json"],
    );
    let rows = v.as_array().expect("array");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["hours"], 4.5);
    assert_eq!(rows[0]["logs"][1]["type"], "OUT");
    assert_eq!(rows[1]["hours"], 0.0);

    rpc()
        .args([
            "--db", &db_path, "--test", "verify", "-e", "EMP-001", "--date", "2025-03-03", "--hours",
            "5", "--rest", "00:30",
        ])
        .assert()
        .success()
        .stdout(contains("created"));

    rpc()
        .args([
            "--db", &db_path, "--test", "verify", "-e", "EMP-001", "--date", "2025-03-03", "--hours",
            "6",
        ])
        .assert()
        .success()
        .stdout(contains("updated"));

    let v = json(
        &db_path,
        &["report", "-e", "EMP-001", "--from", "2025-03-03", "--to", "2025-03-03", "--json"],
    );
    assert_eq!(v[0]["hours"], 6.0);
    assert_eq!(v[0]["is_verified"], true);
    assert_eq!(v[0]["verified_id"], "EMP-001-2025-03-03");
}

#[test]
fn test_forecast_json() {
    let db_path = setup_test_db("it_forecast");
    init_cli_db(&db_path);
    seed_instructor(&db_path);

    let v = json(&db_path, &["forecast", "-m", "marzo", "-y", "2025", "--json"]);

    let lines = v["lines"].as_array().expect("lines");
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["course"], "CUR-01");
    assert_eq!(lines[0]["days_worked"], 2);
    assert_eq!(dec(lines[0]["gross"].as_str().expect("decimal string")), dec("160"));
    assert_eq!(lines[0]["social_security"], "47.04");
    assert_eq!(lines[0]["total"], "193.71");
    assert_eq!(v["summary"]["total_employees"], 1);
}

#[test]
fn test_finalize_is_idempotent() {
    let db_path = setup_test_db("it_finalize");
    init_cli_db(&db_path);
    seed_instructor(&db_path);

    rpc()
        .args(["--db", &db_path, "--test", "payroll", "finalize", "-m", "3", "-y", "2025"])
        .assert()
        .success()
        .stdout(contains("1 created, 0 updated"));

    rpc()
        .args(["--db", &db_path, "--test", "payroll", "finalize", "-m", "3", "-y", "2025"])
        .assert()
        .success()
        .stdout(contains("0 created, 1 updated"));

    let v = json(&db_path, &["payroll", "list", "-m", "3", "-y", "2025", "--json"]);
    let records = v["records"].as_array().expect("records");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["record_key"], "EMP-001-CUR-01-2025-03");
    assert_eq!(v["summary"]["total_payable"], "193.71");

    // nothing left to forecast
    let v = json(&db_path, &["forecast", "-m", "3", "-y", "2025", "--json"]);
    assert!(v["lines"].as_array().expect("lines").is_empty());
}

#[test]
fn test_forecast_rejects_unknown_month() {
    let db_path = setup_test_db("it_bad_month");
    init_cli_db(&db_path);

    rpc()
        .args(["--db", &db_path, "--test", "forecast", "-m", "brumaire", "-y", "2025"])
        .assert()
        .failure()
        .stderr(contains("Invalid month"));
}

#[test]
fn test_log_records_writes() {
    let db_path = setup_test_db("it_log");
    init_cli_db(&db_path);
    run_ok(&db_path, &["employee", "add", "EMP-001", "Ana"]);

    rpc()
        .args(["--db", &db_path, "--test", "log", "--print"])
        .assert()
        .success()
        .stdout(contains("Employee EMP-001 (Ana) created"));
}

#[test]
fn test_db_info() {
    let db_path = setup_test_db("it_db_info");
    init_cli_db(&db_path);
    seed_instructor(&db_path);

    rpc()
        .args(["--db", &db_path, "--test", "db", "--info"])
        .assert()
        .success()
        .stdout(contains("Employees"));
}

#[test]
fn test_db_check_after_finalize() {
    let db_path = setup_test_db("it_db_check");
    init_cli_db(&db_path);
    seed_instructor(&db_path);
    run_ok(&db_path, &["payroll", "finalize", "-m", "3", "-y", "2025"]);

    rpc()
        .args(["--db", &db_path, "--test", "db", "--check", "--migrate"])
        .assert()
        .success()
        .stdout(contains("No pending migrations"))
        .stdout(contains("Payroll keys are unique"));
}

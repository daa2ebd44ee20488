#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{NaiveDate, NaiveDateTime};
use rpayclock::core::access::Caller;
use rpayclock::db::initialize::init_db;
use rpayclock::db::pool::DbPool;
use rpayclock::db::queries;
use rpayclock::models::assignment::{Assignment, SourceType};
use rpayclock::models::employee::Employee;
use rpayclock::models::punch::Punch;
use rpayclock::models::punch_kind::PunchKind;
use rust_decimal::Decimal;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

pub fn rpc() -> Command {
    cargo_bin_cmd!("rpayclock")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rpayclock.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Initialize the schema through the CLI, without touching the config file
pub fn init_cli_db(db_path: &str) {
    rpc()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Open a fresh, migrated database through the library API
pub fn open_test_pool(name: &str) -> DbPool {
    let path = setup_test_db(name);
    let pool = DbPool::new(&path).expect("open db");
    init_db(&pool.conn).expect("init db");
    pool
}

pub fn hr() -> Caller {
    Caller::new("hr@example.com", &["HR Manager"])
}

pub fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("date")
}

pub fn ts(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").expect("timestamp")
}

pub fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).expect("decimal")
}

pub fn punch(employee: &str, at: &str, kind: PunchKind) -> Punch {
    Punch::new(employee, ts(at), kind)
}

pub fn p_in(at: &str) -> Punch {
    punch("EMP-001", at, PunchKind::In)
}

pub fn p_out(at: &str) -> Punch {
    punch("EMP-001", at, PunchKind::Out)
}

pub fn add_employee(pool: &DbPool, id: &str, name: &str) -> Employee {
    let e = Employee::new(id, name);
    queries::insert_employee(&pool.conn, &e).expect("insert employee");
    e
}

pub fn add_punches(pool: &DbPool, punches: &[Punch]) {
    for p in punches {
        queries::insert_punch(&pool.conn, p).expect("insert punch");
    }
}

pub fn assign(pool: &DbPool, employee: &str, course: &str, rate: &str) {
    let a = Assignment {
        id: 0,
        employee: employee.to_string(),
        course: course.to_string(),
        hourly_rate: dec(rate),
        source_type: SourceType::JobOffer,
        source_doc: "HR-OFF-0001".to_string(),
    };
    queries::insert_assignment(&pool.conn, &a).expect("insert assignment");
}

/// One teaching day with the given "HH:MM-HH:MM" ranges
pub fn slot(pool: &DbPool, course: &str, date: &str, ranges: &[&str]) {
    let raw: Vec<(String, String)> = ranges
        .iter()
        .map(|r| rpayclock::utils::time::split_range(r))
        .collect();
    queries::insert_calendar_slot(&pool.conn, course, &d(date), true, &raw).expect("insert slot");
}

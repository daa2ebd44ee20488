mod common;

use chrono::NaiveTime;
use common::{d, p_in, p_out};
use rpayclock::core::calculator::anomalies::{detect_day, detect_days};
use rpayclock::core::calculator::ghost::detect_ghosts;
use rpayclock::models::anomaly::{AnomalyKind, Severity};
use rpayclock::models::attendance::{AttendanceRecord, AttendanceStatus};
use rpayclock::models::day_context::DayInput;
use rpayclock::models::employee::{Employee, EmployeeStatus, OfferStatus};
use std::collections::{BTreeMap, HashSet};

fn emp() -> Employee {
    Employee::new("EMP-001", "Ana García")
}

fn day(date: &str) -> DayInput {
    DayInput::new(d(date))
}

fn attendance(status: AttendanceStatus) -> AttendanceRecord {
    AttendanceRecord {
        id: 1,
        employee: "EMP-001".into(),
        date: d("2025-03-03"),
        status,
        late_entry: false,
        early_exit: false,
        in_time: None,
        out_time: None,
        working_hours: None,
    }
}

fn kinds(v: &[rpayclock::models::anomaly::Anomaly]) -> Vec<AnomalyKind> {
    v.iter().map(|a| a.kind).collect()
}

#[test]
fn test_clean_day_has_no_findings() {
    let mut dy = day("2025-03-03");
    dy.punches = vec![
        p_in("2025-03-03 09:00"),
        p_out("2025-03-03 13:00"),
        p_in("2025-03-03 14:00"),
        p_out("2025-03-03 17:00"),
    ];

    assert!(detect_day(&emp(), &dy, false).is_empty());
}

#[test]
fn test_missing_out_is_reported_once() {
    let mut dy = day("2025-03-03");
    dy.punches = vec![p_in("2025-03-03 09:00"), p_in("2025-03-03 09:05")];

    let found = detect_day(&emp(), &dy, false);

    assert_eq!(kinds(&found), vec![AnomalyKind::MissingPunch]);
    assert_eq!(found[0].severity, Severity::High);
    assert!(found[0].description.contains("missing an OUT"));
}

#[test]
fn test_missing_punch_is_suppressed_today() {
    let mut dy = day("2025-03-03");
    dy.punches = vec![p_in("2025-03-03 09:00")];

    assert!(detect_day(&emp(), &dy, true).is_empty());
}

#[test]
fn test_work_on_holiday_needs_a_session() {
    let mut dy = day("2025-03-03");
    dy.is_holiday = true;

    // punches without a complete session
    dy.punches = vec![p_in("2025-03-03 09:00")];
    let found = detect_day(&emp(), &dy, true);
    assert!(!kinds(&found).contains(&AnomalyKind::WorkOnHoliday));

    dy.punches.push(p_out("2025-03-03 11:00"));
    let found = detect_day(&emp(), &dy, false);
    assert_eq!(kinds(&found), vec![AnomalyKind::WorkOnHoliday]);
    assert_eq!(found[0].severity, Severity::Medium);
}

#[test]
fn test_work_on_leave_names_the_leave_type() {
    let mut dy = day("2025-03-03");
    dy.leave_type = Some("Sick Leave".into());
    dy.punches = vec![p_in("2025-03-03 09:00"), p_out("2025-03-03 10:00")];

    let found = detect_day(&emp(), &dy, false);

    assert_eq!(kinds(&found), vec![AnomalyKind::WorkOnLeave]);
    assert!(found[0].description.contains("Sick Leave"));
}

#[test]
fn test_long_sessions_are_flagged_one_by_one() {
    let mut dy = day("2025-03-03");
    dy.punches = vec![
        p_in("2025-03-03 06:00"),
        p_out("2025-03-03 12:30"),
        p_in("2025-03-03 13:00"),
        p_out("2025-03-03 19:30"),
    ];

    let found = detect_day(&emp(), &dy, false);

    assert_eq!(
        kinds(&found),
        vec![
            AnomalyKind::ExcessiveContinuousWork,
            AnomalyKind::ExcessiveContinuousWork
        ]
    );
    assert!(found[0].description.contains("6.50"));
}

#[test]
fn test_single_long_session_is_not_double_reported() {
    let mut dy = day("2025-03-03");
    dy.punches = vec![p_in("2025-03-03 08:00"), p_out("2025-03-03 15:00")];

    let found = detect_day(&emp(), &dy, false);

    assert_eq!(kinds(&found), vec![AnomalyKind::ExcessiveContinuousWork]);
}

#[test]
fn test_exactly_six_hours_is_fine() {
    let mut dy = day("2025-03-03");
    dy.punches = vec![p_in("2025-03-03 08:00"), p_out("2025-03-03 14:00")];

    assert!(detect_day(&emp(), &dy, false).is_empty());
}

#[test]
fn test_late_and_early_flags_come_from_attendance() {
    let mut att = attendance(AttendanceStatus::Present);
    att.late_entry = true;
    att.early_exit = true;
    att.in_time = NaiveTime::from_hms_opt(9, 40, 0);

    let mut dy = day("2025-03-03");
    dy.attendance = Some(att);

    let found = detect_day(&emp(), &dy, false);

    assert_eq!(
        kinds(&found),
        vec![AnomalyKind::LateEntry, AnomalyKind::EarlyExit]
    );
    assert!(found[0].description.contains("09:40"));
    assert_eq!(found[0].severity, Severity::Low);
}

#[test]
fn test_absent_without_leave() {
    let mut dy = day("2025-03-03");
    dy.attendance = Some(attendance(AttendanceStatus::Absent));

    let found = detect_day(&emp(), &dy, false);
    assert_eq!(kinds(&found), vec![AnomalyKind::Absent]);

    dy.leave_type = Some("Casual Leave".into());
    assert!(detect_day(&emp(), &dy, false).is_empty());

    dy.leave_type = None;
    dy.is_holiday = true;
    assert!(detect_day(&emp(), &dy, false).is_empty());
}

#[test]
fn test_rules_are_independent_and_ordered() {
    let mut att = attendance(AttendanceStatus::Present);
    att.late_entry = true;

    let mut dy = day("2025-03-03");
    dy.is_holiday = true;
    dy.attendance = Some(att);
    dy.punches = vec![
        p_in("2025-03-03 07:00"),
        p_out("2025-03-03 14:00"),
        p_in("2025-03-03 15:00"),
    ];

    let found = detect_day(&emp(), &dy, false);

    assert_eq!(
        kinds(&found),
        vec![
            AnomalyKind::MissingPunch,
            AnomalyKind::WorkOnHoliday,
            AnomalyKind::ExcessiveContinuousWork,
            AnomalyKind::LateEntry,
        ]
    );
}

#[test]
fn test_detect_days_orders_by_employee_then_date() {
    let a = Employee::new("A", "Alpha");
    let b = Employee::new("B", "Beta");

    let mut days: BTreeMap<String, BTreeMap<_, DayInput>> = BTreeMap::new();
    for (id, date) in [("B", "2025-03-03"), ("A", "2025-03-04"), ("A", "2025-03-03")] {
        let mut dy = day(date);
        dy.attendance = Some(attendance(AttendanceStatus::Absent));
        days.entry(id.to_string()).or_default().insert(d(date), dy);
    }

    let found = detect_days(&[b, a], &days, d("2025-03-10"));

    let order: Vec<(String, String)> = found
        .iter()
        .map(|f| (f.employee.clone(), f.date.to_string()))
        .collect();
    assert_eq!(
        order,
        vec![
            ("A".into(), "2025-03-03".into()),
            ("A".into(), "2025-03-04".into()),
            ("B".into(), "2025-03-03".into()),
        ]
    );
}

#[test]
fn test_identical_input_gives_identical_output() {
    let mut dy = day("2025-03-03");
    dy.is_holiday = true;
    dy.punches = vec![p_in("2025-03-03 07:00"), p_out("2025-03-03 14:00")];

    assert_eq!(detect_day(&emp(), &dy, false), detect_day(&emp(), &dy, false));
}

#[test]
fn test_ghost_employees() {
    let mut ghost = Employee::new("G-1", "Ghost");
    ghost.offer_status = Some(OfferStatus::Accepted);

    let mut working = Employee::new("W-1", "Worker");
    working.offer_status = Some(OfferStatus::Accepted);

    let mut left = Employee::new("L-1", "Gone");
    left.offer_status = Some(OfferStatus::Accepted);
    left.status = EmployeeStatus::Left;

    let mut pending = Employee::new("P-1", "Pending");
    pending.offer_status = Some(OfferStatus::Pending);

    let with_punches: HashSet<String> = ["W-1".to_string()].into_iter().collect();
    let today = d("2025-03-15");

    let found = detect_ghosts(&[working, ghost, left, pending], &with_punches, today);

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].employee, "G-1");
    assert_eq!(found[0].kind, AnomalyKind::GhostEmployee);
    assert_eq!(found[0].severity, Severity::Critical);
    assert_eq!(found[0].date, today);
}

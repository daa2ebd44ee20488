mod common;

use common::{add_employee, d, hr, open_test_pool, rpc, setup_test_db, init_cli_db, ts};
use predicates::str::contains;
use rpayclock::core::access::{Caller, authorize_view, narrow, require_hr};
use rpayclock::core::anomalies::AnomalyLogic;
use rpayclock::core::entry::EntryLogic;
use rpayclock::core::payroll::PayrollLogic;
use rpayclock::core::report::ReportLogic;
use rpayclock::db::queries;
use rpayclock::errors::AppError;
use rpayclock::models::employee::Employee;
use rpayclock::models::punch_kind::PunchKind;

fn staff(user: &str) -> Caller {
    Caller::new(user, &["Employee"])
}

fn linked(id: &str, user: &str) -> Employee {
    let mut e = Employee::new(id, id);
    e.user_id = Some(user.to_string());
    e
}

#[test]
fn test_hr_roles() {
    assert!(hr().is_hr());
    assert!(Caller::new("root", &["system manager"]).is_hr());
    assert!(!staff("ana@example.com").is_hr());
    assert!(!Caller::new("nobody", &[]).is_hr());
}

#[test]
fn test_employees_see_only_themselves() {
    let me = staff("ana@example.com");
    let employees = vec![
        linked("EMP-001", "ana@example.com"),
        linked("EMP-002", "luis@example.com"),
        Employee::new("EMP-003", "Unlinked"),
    ];

    let visible: Vec<String> = narrow(&me, employees.clone())
        .into_iter()
        .map(|e| e.id)
        .collect();
    assert_eq!(visible, vec!["EMP-001"]);

    assert_eq!(narrow(&hr(), employees).len(), 3);
}

#[test]
fn test_authorize_view_fails_closed() {
    let me = staff("ana@example.com");
    let mine = linked("EMP-001", "ana@example.com");
    let other = linked("EMP-002", "luis@example.com");

    assert!(authorize_view(&me, Some(&mine), "EMP-001").is_ok());
    assert!(matches!(
        authorize_view(&me, Some(&other), "EMP-002"),
        Err(AppError::PermissionDenied(_))
    ));
    assert!(matches!(
        authorize_view(&me, None, "EMP-404"),
        Err(AppError::PermissionDenied(_))
    ));
    assert!(authorize_view(&hr(), None, "EMP-404").is_err());
}

#[test]
fn test_require_hr() {
    assert!(require_hr(&hr(), "forecast").is_ok());

    let err = require_hr(&staff("ana@example.com"), "forecast").unwrap_err();
    assert!(err.to_string().contains("forecast"));
}

#[test]
fn test_report_of_another_employee_is_denied() {
    let mut pool = open_test_pool("access_report");
    queries::insert_employee(&pool.conn, &linked("EMP-001", "ana@example.com")).unwrap();
    queries::insert_employee(&pool.conn, &linked("EMP-002", "luis@example.com")).unwrap();

    let me = staff("ana@example.com");

    let own = ReportLogic::build(&mut pool, &me, "EMP-001", d("2025-03-01"), d("2025-03-02"));
    assert_eq!(own.unwrap().len(), 2);

    let other = ReportLogic::build(&mut pool, &me, "EMP-002", d("2025-03-01"), d("2025-03-02"));
    assert!(matches!(other, Err(AppError::PermissionDenied(_))));
}

#[test]
fn test_anomalies_are_narrowed_to_the_caller() {
    let mut pool = open_test_pool("access_anomalies");
    queries::insert_employee(&pool.conn, &linked("EMP-001", "ana@example.com")).unwrap();
    queries::insert_employee(&pool.conn, &linked("EMP-002", "luis@example.com")).unwrap();

    for emp in ["EMP-001", "EMP-002"] {
        EntryLogic::add_punch(&mut pool, &hr(), emp, ts("2025-03-03 09:00"), PunchKind::In, None)
            .unwrap();
    }

    let found = AnomalyLogic::run(
        &mut pool,
        &staff("ana@example.com"),
        d("2025-03-01"),
        d("2025-03-31"),
        None,
        d("2025-04-01"),
    )
    .unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].employee, "EMP-001");
}

#[test]
fn test_employees_punch_only_for_themselves() {
    let mut pool = open_test_pool("access_punch");
    queries::insert_employee(&pool.conn, &linked("EMP-001", "ana@example.com")).unwrap();
    add_employee(&pool, "EMP-002", "Luis");

    let me = staff("ana@example.com");

    assert!(
        EntryLogic::add_punch(&mut pool, &me, "EMP-001", ts("2025-03-03 09:00"), PunchKind::In, None)
            .is_ok()
    );
    assert!(
        EntryLogic::add_punch(&mut pool, &me, "EMP-002", ts("2025-03-03 09:00"), PunchKind::In, None)
            .is_err()
    );
}

#[test]
fn test_payroll_requires_hr() {
    let mut pool = open_test_pool("access_payroll");

    let res = PayrollLogic::forecast(&mut pool, &staff("ana@example.com"), 3, 2025, None, None);

    assert!(matches!(res, Err(AppError::PermissionDenied(_))));
}

#[test]
fn test_cli_forecast_denied_without_hr_role() {
    let db_path = setup_test_db("access_cli");
    init_cli_db(&db_path);

    rpc()
        .args([
            "--db", &db_path, "--test", "--user", "ana@example.com", "--role", "Employee",
            "forecast", "-m", "3", "-y", "2025",
        ])
        .assert()
        .failure()
        .stderr(contains("Permission denied"));
}

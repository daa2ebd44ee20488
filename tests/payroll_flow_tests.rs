mod common;

use common::{add_employee, assign, d, dec, hr, open_test_pool, slot};
use rpayclock::core::payroll::PayrollLogic;
use rpayclock::db::ledger::PayrollFilter;
use rpayclock::db::pool::DbPool;
use rpayclock::models::docstatus::DocStatus;
use rpayclock::models::payroll::PayrollState;

/// EMP-001 teaching CUR-01 at 20/h, 8 hours in March 2025.
fn seeded(name: &str) -> DbPool {
    let pool = open_test_pool(name);
    add_employee(&pool, "EMP-001", "Ana García");
    assign(&pool, "EMP-001", "CUR-01", "20");
    slot(&pool, "CUR-01", "2025-03-03", &["09:00-13:00"]);
    slot(&pool, "CUR-01", "2025-03-04", &["09:00-11:00", "15:00-17:00"]);
    pool
}

fn finalize(pool: &mut DbPool, draft: bool) -> rpayclock::core::payroll::FinalizeOutcome {
    PayrollLogic::finalize(pool, &hr(), 3, 2025, None, None, draft, false, d("2025-03-31"))
        .expect("finalize")
}

fn march() -> PayrollFilter {
    PayrollFilter {
        month: Some(3),
        year: Some(2025),
        ..Default::default()
    }
}

#[test]
fn test_forecast_of_a_month() {
    let mut pool = seeded("pf_forecast");

    let (lines, summary) =
        PayrollLogic::forecast(&mut pool, &hr(), 3, 2025, None, None).expect("forecast");

    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].hours, dec("8"));
    assert_eq!(lines[0].days_worked, 2);
    assert_eq!(lines[0].total, dec("193.71"));
    assert_eq!(summary.total_employees, 1);
    assert_eq!(summary.total_payable, dec("193.71"));
}

#[test]
fn test_forecast_filters_by_course() {
    let mut pool = seeded("pf_course_filter");

    let (lines, _) = PayrollLogic::forecast(&mut pool, &hr(), 3, 2025, None, Some("CUR-99"))
        .expect("forecast");

    assert!(lines.is_empty());
}

#[test]
fn test_finalize_twice_keeps_one_record() {
    let mut pool = seeded("pf_idempotent");

    let first = finalize(&mut pool, false);
    assert_eq!((first.created, first.updated), (1, 0));

    let second = finalize(&mut pool, false);
    assert_eq!((second.created, second.updated), (0, 1));

    let (records, summary) = PayrollLogic::list(&mut pool, &hr(), &march()).expect("list");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].record_key, "EMP-001-CUR-01-2025-03");
    assert_eq!(records[0].state, PayrollState::Settled);
    assert_eq!(records[0].docstatus, DocStatus::Submitted);
    assert_eq!(summary.total_payable, dec("193.71"));
}

#[test]
fn test_dash_joined_references_do_not_merge_records() {
    // both render as "EMP-1-X-2025-03"
    let mut pool = open_test_pool("pf_dash_refs");
    add_employee(&pool, "EMP-1", "Ana");
    add_employee(&pool, "EMP", "Luis");
    assign(&pool, "EMP-1", "X", "20");
    assign(&pool, "EMP", "1-X", "20");
    slot(&pool, "X", "2025-03-03", &["09:00-13:00"]);
    slot(&pool, "1-X", "2025-03-03", &["09:00-13:00"]);

    let (lines, _) =
        PayrollLogic::forecast(&mut pool, &hr(), 3, 2025, None, None).expect("forecast");
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].key(), lines[1].key());

    let first = finalize(&mut pool, false);
    assert_eq!((first.created, first.updated), (2, 0));

    let (lines, _) =
        PayrollLogic::forecast(&mut pool, &hr(), 3, 2025, None, None).expect("forecast");
    assert!(lines.is_empty());

    let second = finalize(&mut pool, false);
    assert_eq!((second.created, second.updated), (0, 2));

    let (records, _) = PayrollLogic::list(&mut pool, &hr(), &march()).expect("list");
    let mut owners: Vec<(String, String)> = records
        .iter()
        .map(|r| (r.employee.clone(), r.course.clone()))
        .collect();
    owners.sort();
    assert_eq!(
        owners,
        vec![
            ("EMP".to_string(), "1-X".to_string()),
            ("EMP-1".to_string(), "X".to_string()),
        ]
    );
}

#[test]
fn test_finalized_lines_leave_the_forecast() {
    let mut pool = seeded("pf_forecast_after_finalize");
    finalize(&mut pool, false);

    let (lines, summary) =
        PayrollLogic::forecast(&mut pool, &hr(), 3, 2025, None, None).expect("forecast");

    assert!(lines.is_empty());
    assert_eq!(summary.total_lines, 0);
}

#[test]
fn test_cancel_frees_the_key() {
    let mut pool = seeded("pf_cancel");
    finalize(&mut pool, false);

    let (records, _) = PayrollLogic::list(&mut pool, &hr(), &march()).expect("list");
    let id = records[0].id;

    let out = PayrollLogic::cancel(&mut pool, &hr(), &[id]).expect("cancel");
    assert_eq!(out.updated, 1);

    let (lines, _) =
        PayrollLogic::forecast(&mut pool, &hr(), 3, 2025, None, None).expect("forecast");
    assert_eq!(lines.len(), 1);

    let again = finalize(&mut pool, false);
    assert_eq!(again.created, 1);

    let mut all = march();
    all.include_cancelled = true;
    let (records, summary) = PayrollLogic::list(&mut pool, &hr(), &all).expect("list");
    assert_eq!(records.len(), 2);
    // cancelled records never count in totals
    assert_eq!(summary.total_lines, 1);
    assert_eq!(summary.total_payable, dec("193.71"));
}

#[test]
fn test_extra_hours_on_a_draft() {
    let mut pool = seeded("pf_extra");
    finalize(&mut pool, true);

    let (records, _) = PayrollLogic::list(&mut pool, &hr(), &march()).expect("list");
    let id = records[0].id;
    assert_eq!(records[0].docstatus, DocStatus::Draft);
    assert_eq!(records[0].extra_rate, dec("24.00"));

    let rec =
        PayrollLogic::set_extra_hours(&mut pool, &hr(), id, dec("2"), None).expect("extra");
    assert_eq!(rec.gross, dec("208.00"));

    // a new finalize recomputes ordinary hours and keeps the extra ones
    let again = finalize(&mut pool, true);
    assert_eq!(again.updated, 1);
    let (records, summary) = PayrollLogic::list(&mut pool, &hr(), &march()).expect("list");
    assert_eq!(records[0].extra_hours, dec("2"));
    assert_eq!(records[0].gross, dec("208.00"));
    assert_eq!(summary.total_hours, dec("10"));
}

#[test]
fn test_extra_hours_refused_once_submitted() {
    let mut pool = seeded("pf_extra_submitted");
    finalize(&mut pool, false);

    let (records, _) = PayrollLogic::list(&mut pool, &hr(), &march()).expect("list");

    let err = PayrollLogic::set_extra_hours(&mut pool, &hr(), records[0].id, dec("1"), None);
    assert!(err.is_err());
}

#[test]
fn test_lifecycle_only_moves_submitted_records() {
    let mut pool = seeded("pf_lifecycle");
    finalize(&mut pool, true);

    let (records, _) = PayrollLogic::list(&mut pool, &hr(), &march()).expect("list");
    let id = records[0].id;

    // still a draft
    let out = PayrollLogic::mark_sent(&mut pool, &hr(), &[id], d("2025-04-02")).expect("sent");
    assert_eq!((out.updated, out.skipped), (0, 1));

    let out = PayrollLogic::submit(&mut pool, &hr(), &[id, 9999]).expect("submit");
    assert_eq!((out.updated, out.skipped), (1, 1));

    let out = PayrollLogic::mark_sent(&mut pool, &hr(), &[id], d("2025-04-02")).expect("sent");
    assert_eq!(out.updated, 1);

    let out = PayrollLogic::mark_paid(&mut pool, &hr(), &[id], d("2025-04-10")).expect("paid");
    assert_eq!(out.updated, 1);

    let (records, _) = PayrollLogic::list(&mut pool, &hr(), &march()).expect("list");
    assert_eq!(records[0].state, PayrollState::Paid);
    assert_eq!(records[0].sent_on, Some(d("2025-04-02")));
    assert_eq!(records[0].paid_on, Some(d("2025-04-10")));

    // a paid record is not touched by a new finalize
    let again = finalize(&mut pool, false);
    assert_eq!((again.created, again.updated, again.locked), (0, 0, 1));
}

#[test]
fn test_list_filters_on_substrings() {
    let mut pool = seeded("pf_list_filter");
    finalize(&mut pool, false);

    let mut f = march();
    f.employee = Some("001".into());
    let (records, _) = PayrollLogic::list(&mut pool, &hr(), &f).expect("list");
    assert_eq!(records.len(), 1);

    f.course = Some("XYZ".into());
    let (records, _) = PayrollLogic::list(&mut pool, &hr(), &f).expect("list");
    assert!(records.is_empty());
}

#[test]
fn test_invalid_month_is_rejected() {
    let mut pool = seeded("pf_bad_month");

    assert!(PayrollLogic::forecast(&mut pool, &hr(), 13, 2025, None, None).is_err());
}

mod common;

use chrono::NaiveTime;
use common::{d, dec};
use rpayclock::core::calculator::forecast::{
    derive_amounts, forecast_line, gross_of, month_hours, round_money,
};
use rpayclock::models::assignment::{Assignment, SourceType};
use rpayclock::models::calendar::{CalendarSlot, TimeRange};
use rpayclock::models::employee::Employee;
use rpayclock::models::forecast::payroll_key;
use rpayclock::utils::date::{month_name, parse_month};

fn t(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s, "%H:%M").expect("time")
}

fn teaching(date: &str, ranges: &[(&str, &str)]) -> CalendarSlot {
    CalendarSlot {
        course: "CUR-01".into(),
        date: d(date),
        is_teaching_day: true,
        ranges: ranges.iter().map(|(s, e)| TimeRange::new(t(s), t(e))).collect(),
    }
}

fn assignment(rate: &str) -> Assignment {
    Assignment {
        id: 1,
        employee: "EMP-001".into(),
        course: "CUR-01".into(),
        hourly_rate: dec(rate),
        source_type: SourceType::JobOffer,
        source_doc: "HR-OFF-0001".into(),
    }
}

#[test]
fn test_month_hours_sums_ranges_of_the_month_only() {
    let mut off = teaching("2025-03-05", &[("09:00", "13:00")]);
    off.is_teaching_day = false;

    let slots = vec![
        teaching("2025-03-03", &[("09:00", "13:00"), ("14:00", "16:30")]),
        teaching("2025-03-04", &[("09:00", "11:00")]),
        off,
        teaching("2025-04-01", &[("09:00", "13:00")]),
        teaching("2024-03-03", &[("09:00", "13:00")]),
    ];

    let mh = month_hours(&slots, 3, 2025);

    assert_eq!(mh.seconds, (4 * 3600) + (2 * 3600 + 1800) + (2 * 3600));
    assert_eq!(mh.hours, dec("8.5"));
    assert_eq!(mh.days_worked, 2);
}

#[test]
fn test_invalid_ranges_count_as_zero() {
    let mut slot = teaching("2025-03-03", &[("13:00", "09:00"), ("10:00", "10:00")]);
    slot.ranges.push(TimeRange {
        start: Some(t("09:00")),
        end: None,
    });

    let mh = month_hours(&[slot], 3, 2025);

    assert_eq!(mh.seconds, 0);
    assert_eq!(mh.days_worked, 0);
}

#[test]
fn test_hours_are_not_rounded() {
    let slots = vec![teaching("2025-03-03", &[("09:00", "09:20")])];

    let mh = month_hours(&slots, 3, 2025);

    assert_eq!(mh.seconds, 1200);
    assert_ne!(mh.hours, dec("0.33"));
    assert!(mh.hours > dec("0.3333") && mh.hours < dec("0.3334"));
}

#[test]
fn test_derive_amounts_for_160() {
    let a = derive_amounts(dec("160"));

    assert_eq!(a.gross, dec("160"));
    assert_eq!(a.vacation_accrual, dec("13.33"));
    assert_eq!(a.net_of_vacation, dec("146.67"));
    assert_eq!(a.social_security, dec("47.04"));
    assert_eq!(a.total, dec("193.71"));
}

#[test]
fn test_round_money_half_away_from_zero() {
    assert_eq!(round_money(dec("0.125")), dec("0.13"));
    assert_eq!(round_money(dec("-0.125")), dec("-0.13"));
    assert_eq!(round_money(dec("2.344")), dec("2.34"));
}

#[test]
fn test_gross_includes_extra_hours() {
    assert_eq!(
        gross_of(dec("10"), dec("20"), dec("2"), dec("24")),
        dec("248.00")
    );
}

#[test]
fn test_forecast_line_for_a_month() {
    let slots: Vec<CalendarSlot> = ["2025-03-03", "2025-03-04"]
        .iter()
        .map(|day| teaching(day, &[("09:00", "13:00")]))
        .collect();
    let emp = Employee::new("EMP-001", "Ana García");

    let line = forecast_line(&assignment("20"), &emp, &slots, 3, 2025).expect("line");

    assert_eq!(line.hours, dec("8"));
    assert_eq!(line.days_worked, 2);
    assert_eq!(line.gross, dec("160"));
    assert_eq!(line.total, dec("193.71"));
    assert_eq!(line.extra_rate, dec("24.00"));
    assert_eq!(line.key(), "EMP-001-CUR-01-2025-03");
}

#[test]
fn test_no_line_for_a_month_without_hours() {
    let slots = vec![teaching("2025-03-03", &[("09:00", "13:00")])];
    let emp = Employee::new("EMP-001", "Ana García");

    assert!(forecast_line(&assignment("20"), &emp, &slots, 4, 2025).is_none());
}

#[test]
fn test_payroll_key_is_zero_padded() {
    assert_eq!(payroll_key(" E1 ", "C1", 7, 2025), "E1-C1-2025-07");
}

#[test]
fn test_parse_month_names() {
    assert_eq!(parse_month("3"), Some(3));
    assert_eq!(parse_month("Marzo"), Some(3));
    assert_eq!(parse_month("september"), Some(9));
    assert_eq!(parse_month("SEPTIEMBRE"), Some(9));
    assert_eq!(parse_month("13"), None);
    assert_eq!(parse_month("0"), None);
    assert_eq!(parse_month("brumaire"), None);
    assert_eq!(month_name(3), "Marzo");
}

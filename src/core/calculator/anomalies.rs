//! Rule-based anomaly detection over one employee-day.
//!
//! Every rule is evaluated independently, so one day can produce several
//! findings. The output order is fixed (rule order below), which keeps the
//! result identical for identical input.

use crate::core::calculator::sessions::{self, MissingSide};
use crate::models::anomaly::{Anomaly, AnomalyKind};
use crate::models::attendance::AttendanceStatus;
use crate::models::day_context::DayInput;
use crate::models::employee::Employee;
use crate::models::session::WorkSession;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// A session (or a single-session day) longer than this is flagged.
pub const CONTINUOUS_WORK_LIMIT_SECS: i64 = 6 * 3600;

/// Run every day rule for one employee-day.
///
/// `is_today` suppresses the missing-punch rule: the employee may simply not
/// have clocked out yet.
pub fn detect_day(employee: &Employee, day: &DayInput, is_today: bool) -> Vec<Anomaly> {
    let mut out = Vec::new();
    let found = |kind: AnomalyKind, desc: String| {
        Anomaly::new(&employee.id, &employee.name, day.date, kind, desc)
    };

    let sessions: Vec<WorkSession> = sessions::reconstruct_sessions(&day.punches);
    let has_sessions = !sessions.is_empty();

    // 1. Missing punch (counting rule)
    if !is_today && let Some(mp) = sessions::missing_punch(&day.punches) {
        let desc = match mp.side {
            MissingSide::Out => format!(
                "{} IN and {} OUT punches recorded: probably missing an OUT.",
                mp.ins, mp.outs
            ),
            MissingSide::In => format!(
                "{} OUT and {} IN punches recorded: probably missing an IN.",
                mp.outs, mp.ins
            ),
        };
        out.push(found(AnomalyKind::MissingPunch, desc));
    }

    // 2. Work on holiday
    if has_sessions && day.is_holiday {
        out.push(found(
            AnomalyKind::WorkOnHoliday,
            "Punched on a holiday.".to_string(),
        ));
    }

    // 3. Work on approved leave
    if has_sessions && let Some(leave_type) = &day.leave_type {
        out.push(found(
            AnomalyKind::WorkOnLeave,
            format!("Punched during {}.", leave_type),
        ));
    }

    // 4. Excessive continuous work, one finding per long session
    for s in &sessions {
        if s.duration_seconds() > CONTINUOUS_WORK_LIMIT_SECS {
            out.push(found(
                AnomalyKind::ExcessiveContinuousWork,
                format!(
                    "Continuous work session of {:.2} hours (more than 6h without a break).",
                    s.hours()
                ),
            ));
        }
    }

    // 5. No break: over the limit in a single session, unless rule 4 already fired
    let total = sessions::total_seconds(&sessions);
    if total > CONTINUOUS_WORK_LIMIT_SECS && sessions.len() == 1 {
        let already_flagged = out
            .iter()
            .any(|a| a.kind == AnomalyKind::ExcessiveContinuousWork);
        if !already_flagged {
            out.push(found(
                AnomalyKind::NoBreak,
                format!(
                    "Worked {:.2} hours without recording a break (single session).",
                    total as f64 / 3600.0
                ),
            ));
        }
    }

    // 6-7. Flags precomputed on the attendance record
    if let Some(att) = &day.attendance {
        if att.late_entry {
            let suffix = att
                .in_time
                .map(|t| format!(" ({})", t.format("%H:%M")))
                .unwrap_or_default();
            out.push(found(
                AnomalyKind::LateEntry,
                format!("Employee arrived late.{}", suffix),
            ));
        }

        if att.early_exit {
            let suffix = att
                .out_time
                .map(|t| format!(" ({})", t.format("%H:%M")))
                .unwrap_or_default();
            out.push(found(
                AnomalyKind::EarlyExit,
                format!("Employee left early.{}", suffix),
            ));
        }

        if att.status == AttendanceStatus::Absent && day.leave_type.is_none() && !day.is_holiday {
            out.push(found(
                AnomalyKind::Absent,
                "Marked as Absent without an approved leave application.".to_string(),
            ));
        }
    }

    out
}

/// Run `detect_day` over every employee-day, ordered by employee id then date.
pub fn detect_days(
    employees: &[Employee],
    days: &BTreeMap<String, BTreeMap<NaiveDate, DayInput>>,
    today: NaiveDate,
) -> Vec<Anomaly> {
    let mut out = Vec::new();

    for (emp_id, per_day) in days {
        let Some(emp) = employees.iter().find(|e| &e.id == emp_id) else {
            continue;
        };

        for (date, day) in per_day {
            out.extend(detect_day(emp, day, *date == today));
        }
    }

    out
}
